use std::sync::Arc;

use hashbrown::HashMap as FastHashMap;
use parking_lot::RwLock;

use crate::options::{DuplicatePolicy, EngineOptions};
use crate::pattern::CompileResult;
use crate::reverse::UriBuilder;
use crate::route::{CompiledRoute, RouteFilter};
use crate::types::{ParamMap, ParamPatterns};

use super::{
    CacheStore, FilterCatalog, ROUTE_CACHE_KEY, RegistryError, RegistryMetrics, RegistryResult,
    RegistrySnapshot, RegistryStats, RouteSource,
};

#[derive(Debug, Clone)]
pub struct NamedRoute {
    pub name: String,
    pub route: Arc<CompiledRoute>,
}

/// Insertion-ordered, immutable view of the registered routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<NamedRoute>,
    index: FastHashMap<String, usize>,
}

impl RouteTable {
    pub fn get(&self, name: &str) -> Option<&Arc<CompiledRoute>> {
        self.index.get(name).map(|&idx| &self.entries[idx].route)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedRoute> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true when an existing entry was replaced; it keeps its position.
    fn insert(&mut self, name: String, route: Arc<CompiledRoute>) -> bool {
        if let Some(&idx) = self.index.get(&name) {
            self.entries[idx].route = route;
            return true;
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(NamedRoute { name, route });
        false
    }
}

/// Named collection of compiled routes owned by the application.
///
/// Reads hand out an `Arc` of the current table; mutation builds a new table
/// under the write lock and swaps it in.
#[derive(Debug)]
pub struct Registry {
    table: RwLock<Arc<RouteTable>>,
    filters: RwLock<FilterCatalog>,
    stats: RegistryStats,
    options: EngineOptions,
    uris: UriBuilder,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            table: RwLock::new(Arc::new(RouteTable::default())),
            filters: RwLock::new(FilterCatalog::new()),
            stats: RegistryStats::default(),
            options: EngineOptions::default(),
            uris: UriBuilder::default(),
        }
    }
}

impl Registry {
    pub fn new(options: Option<EngineOptions>) -> RegistryResult<Self> {
        let options = options.unwrap_or_default();
        options.validate()?;
        let uris = UriBuilder::from_options(&options)?;
        Ok(Self {
            options,
            uris,
            ..Self::default()
        })
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn uri_builder(&self) -> &UriBuilder {
        &self.uris
    }

    /// Compiles with this registry's default segment pattern and default action.
    pub fn compile<S: AsRef<str>>(
        &self,
        template: S,
        overrides: ParamPatterns,
    ) -> CompileResult<CompiledRoute> {
        CompiledRoute::compile_with(template, overrides, &self.options)
    }

    #[tracing::instrument(level = "trace", skip(self, name, route), fields(name=%name.as_ref(), template=%route.template()))]
    pub fn register<S: AsRef<str>>(
        &self,
        name: S,
        route: CompiledRoute,
    ) -> RegistryResult<Arc<CompiledRoute>> {
        let name = name.as_ref();
        let route = Arc::new(route);

        let mut guard = self.table.write();
        if guard.contains(name) && self.options.duplicate_policy == DuplicatePolicy::Reject {
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
            });
        }

        {
            let mut catalog = self.filters.write();
            for filter in route.filters() {
                catalog.register(filter.clone());
            }
        }

        let replaced = Arc::make_mut(&mut *guard).insert(name.to_string(), Arc::clone(&route));
        self.stats.record_insert();
        if replaced {
            self.stats.record_replace();
            tracing::debug!(name, "replaced registered route");
        }
        Ok(route)
    }

    pub fn register_filter(&self, filter: RouteFilter) {
        self.filters.write().register(filter);
    }

    pub fn by_name(&self, name: &str) -> Option<Arc<CompiledRoute>> {
        self.table.read().get(name).cloned()
    }

    pub fn get(&self, name: &str) -> RegistryResult<Arc<CompiledRoute>> {
        self.by_name(name).ok_or_else(|| RegistryError::RouteNotFound {
            name: name.to_string(),
        })
    }

    /// Name under which this exact route handle is registered.
    pub fn name_of(&self, route: &CompiledRoute) -> Option<String> {
        self.table
            .read()
            .iter()
            .find(|entry| std::ptr::eq(entry.route.as_ref(), route))
            .map(|entry| entry.name.clone())
    }

    pub fn all(&self) -> Arc<RouteTable> {
        Arc::clone(&*self.table.read())
    }

    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    pub fn metrics(&self) -> RegistryMetrics {
        self.stats.snapshot()
    }

    pub fn is_external(&self, name: &str) -> RegistryResult<bool> {
        let route = self.get(name)?;
        Ok(self.uris.is_external(&route))
    }

    pub fn uri(&self, name: &str, params: &ParamMap) -> RegistryResult<String> {
        let route = self.get(name)?;
        Ok(self.uris.uri(&route, params, None)?)
    }

    pub fn url(
        &self,
        name: &str,
        params: &ParamMap,
        protocol: Option<&str>,
    ) -> RegistryResult<String> {
        let route = self.get(name)?;
        Ok(self.uris.url(&route, params, protocol)?)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn save_snapshot(&self) -> RegistryResult<Vec<u8>> {
        let table = self.all();
        let routes = table
            .iter()
            .map(|entry| RouteSource::from_route(&entry.name, &entry.route))
            .collect();
        let bytes = RegistrySnapshot::new(routes).encode()?;
        self.stats.record_save();
        tracing::debug!(routes = table.len(), bytes = bytes.len(), "saved route snapshot");
        Ok(bytes)
    }

    /// Applies a snapshot. `append == false` replaces the registry with the
    /// snapshot's routes; `append == true` adds only names not registered yet.
    /// Returns `Ok(false)` when there is no readable snapshot.
    #[tracing::instrument(level = "trace", skip(self, blob))]
    pub fn load_snapshot(&self, blob: Option<&[u8]>, append: bool) -> RegistryResult<bool> {
        let Some(bytes) = blob else {
            return Ok(false);
        };
        let Some(snapshot) = RegistrySnapshot::decode(bytes) else {
            self.stats.record_reject();
            return Ok(false);
        };

        let rebuilt = {
            let catalog = self.filters.read();
            snapshot
                .routes
                .iter()
                .map(|source| {
                    source
                        .rebuild(&self.options, &catalog)
                        .map(|route| (source.name.clone(), Arc::new(route)))
                })
                .collect::<RegistryResult<Vec<_>>>()?
        };

        let mut guard = self.table.write();
        let mut next = if append {
            RouteTable::clone(&**guard)
        } else {
            RouteTable::default()
        };
        for (name, route) in rebuilt {
            if append && next.contains(&name) {
                continue;
            }
            next.insert(name, route);
        }
        let count = next.len();
        *guard = Arc::new(next);
        drop(guard);

        self.stats.record_load();
        tracing::debug!(routes = count, append, "loaded route snapshot");
        Ok(true)
    }

    pub fn save_cache(&self, store: &dyn CacheStore) -> RegistryResult<()> {
        let bytes = self.save_snapshot()?;
        store.save(ROUTE_CACHE_KEY, &bytes)?;
        Ok(())
    }

    pub fn load_cache(&self, store: &dyn CacheStore, append: bool) -> RegistryResult<bool> {
        let blob = store.load(ROUTE_CACHE_KEY)?;
        self.load_snapshot(blob.as_deref(), append)
    }
}
