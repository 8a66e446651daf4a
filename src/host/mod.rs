mod resolver;
mod trusted;

pub use resolver::HostResolver;
pub use trusted::TrustedHosts;
