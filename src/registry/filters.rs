use hashbrown::HashMap as FastHashMap;

use crate::route::RouteFilter;

/// Filters by id, used to re-attach filters to routes rebuilt from a snapshot.
#[derive(Debug, Default, Clone)]
pub struct FilterCatalog {
    filters: FastHashMap<String, RouteFilter>,
}

impl FilterCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last registration under an id wins.
    pub fn register(&mut self, filter: RouteFilter) {
        self.filters.insert(filter.id().to_string(), filter);
    }

    pub fn get(&self, id: &str) -> Option<&RouteFilter> {
        self.filters.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.filters.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
