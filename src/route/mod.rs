mod compiled;
mod defaults;
mod filter;

pub use compiled::CompiledRoute;
pub use defaults::{ACTION_KEY, HOST_KEY, RouteDefaults};
pub use filter::{FilterFn, FilterOutcome, RouteFilter};
