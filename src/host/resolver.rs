use crate::options::{DEFAULT_LOCAL_HOSTS, DEFAULT_PROTOCOL, EngineOptions, OptionsError};
use crate::reverse::{UriError, UriResult};
use crate::route::{CompiledRoute, HOST_KEY};
use crate::types::ParamMap;

use super::TrustedHosts;

/// Decides whether a route is external and renders the `protocol://host`
/// prefix for it.
#[derive(Debug, Clone)]
pub struct HostResolver {
    default_protocol: String,
    local_hosts: Vec<String>,
    trusted: TrustedHosts,
}

impl Default for HostResolver {
    fn default() -> Self {
        Self {
            default_protocol: DEFAULT_PROTOCOL.to_string(),
            local_hosts: DEFAULT_LOCAL_HOSTS.iter().map(|h| h.to_string()).collect(),
            trusted: TrustedHosts::default(),
        }
    }
}

impl HostResolver {
    pub fn from_options(options: &EngineOptions) -> Result<Self, OptionsError> {
        Ok(Self {
            default_protocol: options.default_protocol.clone(),
            local_hosts: options.local_hosts.clone(),
            trusted: TrustedHosts::new(&options.trusted_hosts)?,
        })
    }

    pub fn trusted_hosts(&self) -> &TrustedHosts {
        &self.trusted
    }

    pub fn is_external(&self, route: &CompiledRoute) -> bool {
        route
            .defaults()
            .host()
            .is_some_and(|host| !self.is_local(host))
    }

    fn is_local(&self, host: &str) -> bool {
        self.local_hosts.iter().any(|local| local == host)
    }

    /// `protocol://host` for an external route, `None` for a local one. A
    /// `host` entry in `params` takes precedence over the route default.
    #[tracing::instrument(level = "trace", skip(self, route, params), fields(template=%route.template()))]
    pub fn resolve_prefix(
        &self,
        route: &CompiledRoute,
        params: &ParamMap,
        protocol: Option<&str>,
    ) -> UriResult<Option<String>> {
        if !self.is_external(route) {
            return Ok(None);
        }
        let Some(host) = params
            .get(HOST_KEY)
            .map(String::as_str)
            .filter(|host| !self.is_local(host))
            .or_else(|| route.defaults().host())
        else {
            return Ok(None);
        };
        self.absolute_prefix(host, protocol).map(Some)
    }

    /// Builds `protocol://host` from a host value that may already carry a
    /// scheme. An explicit protocol wins over the embedded one.
    pub fn absolute_prefix(&self, host: &str, protocol: Option<&str>) -> UriResult<String> {
        let (embedded, bare) = match host.split_once("://") {
            Some((scheme, rest)) => (Some(scheme), rest),
            None => (None, host),
        };
        let bare = bare.trim_end_matches('/');
        self.check_trusted(bare)?;

        let protocol = protocol
            .map(|p| p.trim_end_matches("://"))
            .filter(|p| !p.is_empty())
            .or(embedded)
            .unwrap_or(self.default_protocol.as_str());
        Ok(format!("{}://{}", protocol, bare))
    }

    /// With an empty whitelist every host passes.
    pub fn check_trusted(&self, host: &str) -> UriResult<()> {
        if self.trusted.is_empty() || self.trusted.is_trusted(host) {
            return Ok(());
        }
        Err(UriError::UntrustedHost {
            host: host.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParamPatterns;

    fn route_with_host(host: &str) -> CompiledRoute {
        CompiledRoute::compile("local/test/route", ParamPatterns::new())
            .expect("template should compile")
            .with_default(HOST_KEY, host)
    }

    #[test]
    fn local_host_values_are_not_external() {
        let resolver = HostResolver::default();
        assert!(!resolver.is_external(&route_with_host("localhost")));
        assert!(!resolver.is_external(&route_with_host("")));
        assert!(resolver.is_external(&route_with_host("example.com")));
    }

    #[test]
    fn explicit_protocol_replaces_embedded_scheme() {
        let resolver = HostResolver::default();
        let prefix = resolver
            .absolute_prefix("http://example.com/", Some("https"))
            .expect("host should resolve");
        assert_eq!(prefix, "https://example.com");
    }

    #[test]
    fn embedded_scheme_beats_default_protocol() {
        let options = EngineOptions::builder()
            .default_protocol("ftp")
            .build()
            .expect("options should build");
        let resolver = HostResolver::from_options(&options).expect("resolver should build");
        assert_eq!(
            resolver.absolute_prefix("https://example.com", None).expect("host should resolve"),
            "https://example.com"
        );
        assert_eq!(
            resolver.absolute_prefix("example.com", None).expect("host should resolve"),
            "ftp://example.com"
        );
    }

    #[test]
    fn untrusted_host_is_refused() {
        let options = EngineOptions::builder()
            .trusted_hosts([r"example\.com"])
            .build()
            .expect("options should build");
        let resolver = HostResolver::from_options(&options).expect("resolver should build");
        let err = resolver
            .absolute_prefix("http://evil.net", None)
            .expect_err("host should be refused");
        assert_eq!(
            err,
            UriError::UntrustedHost {
                host: "evil.net".to_string()
            }
        );
    }

    #[test]
    fn params_host_overrides_default() {
        let resolver = HostResolver::default();
        let route = route_with_host("example.com");
        let mut params = ParamMap::new();
        params.insert(HOST_KEY.to_string(), "cdn.example.com".to_string());
        let prefix = resolver
            .resolve_prefix(&route, &params, None)
            .expect("host should resolve");
        assert_eq!(prefix.as_deref(), Some("http://cdn.example.com"));
    }
}
