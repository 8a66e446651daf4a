//! Serialized form of the registry: the reconstruction inputs of every route,
//! never the compiled patterns themselves. Restoring re-runs the compiler.

use serde::{Deserialize, Serialize};

use crate::options::EngineOptions;
use crate::route::{CompiledRoute, RouteDefaults};
use crate::types::{ParamMap, ParamPatterns};

use super::{FilterCatalog, RegistryError, RegistryResult};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub version: u32,
    pub routes: Vec<RouteSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSource {
    pub name: String,
    pub template: String,
    #[serde(default)]
    pub overrides: ParamPatterns,
    /// Pattern each placeholder was compiled with.
    #[serde(default)]
    pub param_patterns: ParamPatterns,
    #[serde(default)]
    pub defaults: ParamMap,
    #[serde(default)]
    pub filters: Vec<String>,
}

impl RouteSource {
    pub fn from_route(name: &str, route: &CompiledRoute) -> Self {
        Self {
            name: name.to_string(),
            template: route.template().to_string(),
            overrides: route.overrides().clone(),
            param_patterns: route.param_patterns().clone(),
            defaults: route.defaults().as_map().clone(),
            filters: route.filters().iter().map(|f| f.id().to_string()).collect(),
        }
    }

    pub fn rebuild(
        &self,
        options: &EngineOptions,
        catalog: &FilterCatalog,
    ) -> RegistryResult<CompiledRoute> {
        let mut route = CompiledRoute::restore(
            &self.template,
            self.overrides.clone(),
            &self.param_patterns,
            options,
        )?
        .replace_defaults(RouteDefaults::from(self.defaults.clone()));

        for id in &self.filters {
            let filter = catalog
                .get(id)
                .ok_or_else(|| RegistryError::UnknownFilter {
                    route: self.name.clone(),
                    filter: id.clone(),
                })?;
            route = route.with_filter(filter.clone());
        }
        Ok(route)
    }
}

impl RegistrySnapshot {
    pub fn new(routes: Vec<RouteSource>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            routes,
        }
    }

    pub fn encode(&self) -> RegistryResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// `None` when the blob is not a snapshot this version can read.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Self>(bytes) {
            Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => Some(snapshot),
            Ok(snapshot) => {
                tracing::warn!(
                    version = snapshot.version,
                    expected = SNAPSHOT_VERSION,
                    "ignoring route snapshot with unsupported version"
                );
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable route snapshot");
                None
            }
        }
    }
}
