use std::collections::BTreeMap;

use crate::enums::HttpMethod;

/// Parameter name to value, as produced by matching and consumed by reverse building.
pub type ParamMap = BTreeMap<String, String>;

/// Placeholder name to regex override.
pub type ParamPatterns = BTreeMap<String, String>;

/// What a filter gets to see of the request being matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
}

impl<'a> RequestContext<'a> {
    pub fn new(path: &'a str, method: HttpMethod) -> Self {
        Self { path, method }
    }
}
