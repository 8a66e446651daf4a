use crate::options::OptionsError;
use crate::pattern::CompileError;
use crate::registry::RegistryError;
use crate::reverse::UriError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Uri(#[from] UriError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Options(#[from] OptionsError),
}

pub type RouteResult<T> = Result<T, RouteError>;
