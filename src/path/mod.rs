mod normalize;

pub use normalize::{tidy_built_path, trim_request_path};
