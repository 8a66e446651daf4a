use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("group opened at byte {start} in template '{template}' is never closed")]
    UnterminatedGroup { template: String, start: usize },
    #[error("unexpected ')' at byte {index} in template '{template}'")]
    UnexpectedClosingParenthesis { template: String, index: usize },
    #[error("empty group at byte {start} in template '{template}'")]
    EmptyGroup { template: String, start: usize },
    #[error("placeholder at byte {start} in template '{template}' is missing a name")]
    PlaceholderMissingName { template: String, start: usize },
    #[error(
        "placeholder '{name}' at byte {start} in template '{template}' must start with an alphabetic character or underscore (found '{found}')"
    )]
    PlaceholderInvalidStart {
        template: String,
        name: String,
        start: usize,
        found: char,
    },
    #[error(
        "placeholder '{name}' at byte {start} in template '{template}' contains invalid character '{invalid}'"
    )]
    PlaceholderInvalidCharacter {
        template: String,
        name: String,
        start: usize,
        invalid: char,
    },
    #[error("placeholder '{name}' appears twice in template '{template}' (second at byte {start})")]
    DuplicatePlaceholder {
        template: String,
        name: String,
        start: usize,
    },
    #[error("lone escape character at byte {index} in template '{template}'")]
    LoneEscapeCharacter { template: String, index: usize },
    #[error("pattern for placeholder '{name}' in template '{template}' is invalid: {error}")]
    InvalidRegex {
        template: String,
        name: String,
        error: String,
    },
    #[error("compiled pattern for template '{template}' is invalid: {error}")]
    InvalidPattern { template: String, error: String },
}

pub type CompileResult<T> = Result<T, CompileError>;
