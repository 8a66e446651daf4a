pub mod ast;
mod error;
mod parser;
mod render;

pub use ast::{GroupNode, PlaceholderNode, TemplateAst, TemplateNode};
pub use error::{CompileError, CompileResult};
pub use parser::parse_template;
pub use render::{CompiledTemplate, DEFAULT_PARAM_PATTERN, compile_template, to_regex};
