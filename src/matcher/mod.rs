mod params;
mod resolver;

pub(crate) use params::{captures_to_map, merge_defaults};
pub use resolver::match_route;
