use thiserror::Error;

use crate::options::OptionsError;
use crate::pattern::CompileError;
use crate::reverse::UriError;

use super::CacheError;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("a route named '{name}' is already registered")]
    DuplicateName { name: String },
    #[error("the requested route does not exist: {name}")]
    RouteNotFound { name: String },
    #[error("route '{route}' references unknown filter '{filter}'")]
    UnknownFilter { route: String, filter: String },
    #[error("failed to encode route snapshot: {0}")]
    SnapshotEncode(#[from] serde_json::Error),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Uri(#[from] UriError),
    #[error(transparent)]
    Options(#[from] OptionsError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
