use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UriError {
    #[error("required route parameter '{param}' not passed for template '{template}'")]
    MissingParameter { param: String, template: String },
    #[error("host '{host}' is not trusted")]
    UntrustedHost { host: String },
    #[error("a protocol was requested but no site host is configured")]
    SiteHostUnavailable,
}

pub type UriResult<T> = Result<T, UriError>;
