pub mod enums;
pub mod errors;
pub mod host;
pub mod matcher;
pub mod options;
mod path;
pub mod pattern;
pub mod registry;
pub mod reverse;
pub mod route;
pub mod types;

pub use enums::HttpMethod;
pub use errors::{RouteError, RouteResult};
pub use host::{HostResolver, TrustedHosts};
pub use matcher::match_route;
pub use options::{DuplicatePolicy, EngineOptions, EngineOptionsBuilder, OptionsError};
pub use pattern::CompileError;
pub use registry::{
    CacheStore, MemoryCacheStore, Registry, RegistryError, RegistryMetrics, RouteTable,
};
pub use reverse::{UriBuilder, UriError, build_path};
pub use route::{CompiledRoute, FilterOutcome, RouteDefaults, RouteFilter};
pub use types::{ParamMap, ParamPatterns, RequestContext};

/// Compiles `template` with library defaults.
pub fn compile<S: AsRef<str>>(
    template: S,
    overrides: ParamPatterns,
) -> Result<CompiledRoute, CompileError> {
    CompiledRoute::compile(template, overrides)
}

/// Reverse-builds `route` with library defaults.
pub fn build_uri(route: &CompiledRoute, params: &ParamMap) -> Result<String, UriError> {
    route.uri(params)
}

pub fn is_external(route: &CompiledRoute) -> bool {
    route.is_external()
}
