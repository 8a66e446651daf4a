mod builder;
mod encode;
mod error;

pub use builder::{UriBuilder, build_path};
pub use encode::encode_param;
pub use error::{UriError, UriResult};
