use regex::Captures;

use crate::route::{CompiledRoute, RouteDefaults};
use crate::types::ParamMap;

/// Named captures of `route` as a map. A placeholder that did not take part in
/// the match is left out; one that captured an empty string is left out when
/// a default will fill it.
pub(crate) fn captures_to_map(route: &CompiledRoute, caps: &Captures<'_>) -> ParamMap {
    let mut map = ParamMap::new();
    for name in route.ast().placeholders() {
        let Some(found) = caps.name(name) else {
            continue;
        };
        if found.as_str().is_empty() && route.defaults().contains(name) {
            continue;
        }
        map.insert(name.to_string(), found.as_str().to_string());
    }
    map
}

/// Fills every key missing from `params` from `defaults`; present captures win.
pub(crate) fn merge_defaults(params: &mut ParamMap, defaults: &RouteDefaults) {
    for (key, value) in defaults.iter() {
        if !params.contains_key(key) {
            params.insert(key.to_string(), value.to_string());
        }
    }
}
