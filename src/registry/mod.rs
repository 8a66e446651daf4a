mod cache;
mod error;
mod filters;
pub mod snapshot;
mod stats;
mod store;

pub use cache::{CacheError, CacheStore, MemoryCacheStore, ROUTE_CACHE_KEY};
pub use error::{RegistryError, RegistryResult};
pub use filters::FilterCatalog;
pub use snapshot::{RegistrySnapshot, RouteSource, SNAPSHOT_VERSION};
pub use stats::{RegistryMetrics, RegistryStats};
pub use store::{NamedRoute, Registry, RouteTable};
