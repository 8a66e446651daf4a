use hashbrown::HashMap as FastHashMap;
use parking_lot::RwLock;
use thiserror::Error;

/// Key the registry snapshot is stored under.
pub const ROUTE_CACHE_KEY: &str = "route_template.routes";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache store failed for key '{key}': {message}")]
    Store { key: String, message: String },
}

/// Opaque key/value storage for registry snapshots.
pub trait CacheStore: Send + Sync {
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError>;

    /// `Ok(None)` when nothing is stored under `key`.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;
}

#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: RwLock<FastHashMap<String, Vec<u8>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl CacheStore for MemoryCacheStore {
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        self.entries.write().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.read().get(key).cloned())
    }
}
