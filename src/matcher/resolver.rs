use crate::enums::HttpMethod;
use crate::path::trim_request_path;
use crate::route::{CompiledRoute, FilterOutcome};
use crate::types::{ParamMap, RequestContext};

use super::{captures_to_map, merge_defaults};

/// Matches `path` against `route`. `None` is the normal "no match" outcome,
/// either structural or a filter veto.
#[tracing::instrument(level = "trace", skip(route), fields(template=%route.template(), method=?method, path=%path))]
pub fn match_route(route: &CompiledRoute, path: &str, method: HttpMethod) -> Option<ParamMap> {
    let candidate = trim_request_path(path);
    let caps = route.regex().captures(candidate)?;

    let mut params = captures_to_map(route, &caps);
    merge_defaults(&mut params, route.defaults());

    apply_filters(route, params, &RequestContext::new(path, method))
}

fn apply_filters(
    route: &CompiledRoute,
    mut params: ParamMap,
    ctx: &RequestContext<'_>,
) -> Option<ParamMap> {
    for filter in route.filters() {
        match filter.apply(route, &params, ctx) {
            FilterOutcome::Keep => {}
            FilterOutcome::Replace(next) => params = next,
            FilterOutcome::Reject => {
                tracing::event!(
                    tracing::Level::TRACE,
                    filter = filter.id(),
                    template = route.template(),
                    "filter rejected match"
                );
                return None;
            }
        }
    }
    Some(params)
}
