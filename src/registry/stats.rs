use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the registry counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegistryMetrics {
    pub routes_registered: u64,
    pub routes_replaced: u64,
    pub snapshots_saved: u64,
    pub snapshots_loaded: u64,
    pub snapshots_rejected: u64,
}

#[derive(Debug, Default)]
pub struct RegistryStats {
    registered: AtomicU64,
    replaced: AtomicU64,
    saved: AtomicU64,
    loaded: AtomicU64,
    rejected: AtomicU64,
}

impl RegistryStats {
    pub fn record_insert(&self) {
        self.registered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_replace(&self) {
        self.replaced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_save(&self) {
        self.saved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load(&self) {
        self.loaded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reject(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RegistryMetrics {
        RegistryMetrics {
            routes_registered: self.registered.load(Ordering::Relaxed),
            routes_replaced: self.replaced.load(Ordering::Relaxed),
            snapshots_saved: self.saved.load(Ordering::Relaxed),
            snapshots_loaded: self.loaded.load(Ordering::Relaxed),
            snapshots_rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}
