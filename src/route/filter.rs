use std::fmt;
use std::sync::Arc;

use crate::route::CompiledRoute;
use crate::types::{ParamMap, RequestContext};

/// Result of running one filter over a structurally matched route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Keep the parameters as they are.
    Keep,
    /// Carry this map to the next filter instead.
    Replace(ParamMap),
    /// Veto the match.
    Reject,
}

pub type FilterFn =
    dyn Fn(&CompiledRoute, &ParamMap, &RequestContext<'_>) -> FilterOutcome + Send + Sync;

/// A named filter callable. The id is what a registry snapshot stores.
#[derive(Clone)]
pub struct RouteFilter {
    id: Arc<str>,
    func: Arc<FilterFn>,
}

impl RouteFilter {
    pub fn new<S, F>(id: S, func: F) -> Self
    where
        S: Into<String>,
        F: Fn(&CompiledRoute, &ParamMap, &RequestContext<'_>) -> FilterOutcome
            + Send
            + Sync
            + 'static,
    {
        Self {
            id: Arc::from(id.into()),
            func: Arc::new(func),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn apply(
        &self,
        route: &CompiledRoute,
        params: &ParamMap,
        ctx: &RequestContext<'_>,
    ) -> FilterOutcome {
        (self.func)(route, params, ctx)
    }
}

impl fmt::Debug for RouteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteFilter").field("id", &self.id).finish()
    }
}
