use smallvec::SmallVec;

use crate::host::HostResolver;
use crate::options::{EngineOptions, OptionsError};
use crate::path::tidy_built_path;
use crate::pattern::TemplateNode;
use crate::route::CompiledRoute;
use crate::types::ParamMap;

use super::encode::encode_param;
use super::{UriError, UriResult};

struct Rendered {
    text: String,
    /// Set once anything in the sequence carries a non-default value.
    required: bool,
}

/// Reverse-builds the path of `route` from `params` and the route defaults.
///
/// Optional groups are rendered only when something inside them was given a
/// value that differs from its default. Within a rendered sequence, every
/// placeholder must resolve to a supplied value or a default.
#[tracing::instrument(level = "trace", skip(route, params), fields(template=%route.template(), params=params.len() as u64))]
pub fn build_path(route: &CompiledRoute, params: &ParamMap) -> UriResult<String> {
    let rendered = render_sequence(&route.ast().nodes, true, route, params)?;
    Ok(tidy_built_path(&rendered.text))
}

fn render_sequence(
    nodes: &[TemplateNode],
    mut required: bool,
    route: &CompiledRoute,
    params: &ParamMap,
) -> UriResult<Rendered> {
    let defaults = route.defaults();
    let mut text = String::new();
    let mut missing: SmallVec<[&str; 4]> = SmallVec::new();

    for node in nodes {
        match node {
            TemplateNode::Literal(value) => text.push_str(value),
            TemplateNode::Placeholder(p) => {
                let name = p.name.as_str();
                if let Some(value) = params.get(name) {
                    if defaults.get(name) != Some(value.as_str()) {
                        required = true;
                    }
                    text.push_str(&encode_param(value));
                } else if let Some(default) = defaults.get(name) {
                    text.push_str(default);
                } else {
                    missing.push(name);
                }
            }
            TemplateNode::Group(group) => {
                let inner = render_sequence(&group.nodes, false, route, params)?;
                if inner.required {
                    required = true;
                    text.push_str(&inner.text);
                }
            }
        }
    }

    if required && let Some(param) = missing.first() {
        return Err(UriError::MissingParameter {
            param: param.to_string(),
            template: route.template().to_string(),
        });
    }

    Ok(Rendered { text, required })
}

/// Reverse builder bound to one set of engine options.
#[derive(Debug, Clone)]
pub struct UriBuilder {
    hosts: HostResolver,
    base_url: String,
    index_file: String,
    site_host: Option<String>,
}

impl Default for UriBuilder {
    fn default() -> Self {
        let options = EngineOptions::default();
        Self {
            hosts: HostResolver::default(),
            base_url: options.base_url,
            index_file: options.index_file,
            site_host: options.site_host,
        }
    }
}

impl UriBuilder {
    pub fn from_options(options: &EngineOptions) -> Result<Self, OptionsError> {
        Ok(Self {
            hosts: HostResolver::from_options(options)?,
            base_url: options.base_url.clone(),
            index_file: options.index_file.clone(),
            site_host: options.site_host.clone(),
        })
    }

    pub fn hosts(&self) -> &HostResolver {
        &self.hosts
    }

    pub fn is_external(&self, route: &CompiledRoute) -> bool {
        self.hosts.is_external(route)
    }

    /// The route path, prefixed with `protocol://host/` when the route is external.
    pub fn uri(
        &self,
        route: &CompiledRoute,
        params: &ParamMap,
        protocol: Option<&str>,
    ) -> UriResult<String> {
        let path = build_path(route, params)?;
        match self.hosts.resolve_prefix(route, params, protocol)? {
            Some(prefix) => Ok(format!("{}/{}", prefix, path)),
            None => Ok(path),
        }
    }

    /// Like [`UriBuilder::uri`], but a local route is made site-absolute:
    /// base URL and index file in front, plus `protocol://site_host` when a
    /// protocol is requested.
    pub fn url(
        &self,
        route: &CompiledRoute,
        params: &ParamMap,
        protocol: Option<&str>,
    ) -> UriResult<String> {
        if self.hosts.is_external(route) {
            return self.uri(route, params, protocol);
        }
        let path = build_path(route, params)?;
        let base = self.site_base(protocol)?;
        Ok(format!("{}{}", base, path))
    }

    fn site_base(&self, protocol: Option<&str>) -> UriResult<String> {
        let trimmed = self.base_url.trim_matches('/');
        let mut base = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };
        if !self.index_file.is_empty() {
            base.push_str(self.index_file.trim_matches('/'));
            base.push('/');
        }

        let Some(protocol) = protocol else {
            return Ok(base);
        };
        let host = self
            .site_host
            .as_deref()
            .ok_or(UriError::SiteHostUnavailable)?;
        let prefix = self.hosts.absolute_prefix(host, Some(protocol))?;
        Ok(format!("{}{}", prefix, base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParamPatterns;

    fn params(pairs: &[(&str, &str)]) -> ParamMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn nested_required_group_forces_ancestors() {
        let route = CompiledRoute::compile("(<controller>(/<action>(/<id>)))", ParamPatterns::new())
            .expect("template should compile")
            .with_defaults([("controller", "welcome"), ("action", "index")]);

        assert_eq!(
            build_path(&route, &params(&[("id", "1")])).expect("uri should build"),
            "welcome/index/1"
        );
    }

    #[test]
    fn missing_ancestor_placeholder_fails_when_group_renders() {
        // `action` has a seeded default, so use a placeholder without one
        let route = CompiledRoute::compile("(<controller>(/<verb>))", ParamPatterns::new())
            .expect("template should compile");
        let err = build_path(&route, &params(&[("verb", "awesome-action")]))
            .expect_err("controller should be required");
        assert_eq!(
            err,
            UriError::MissingParameter {
                param: "controller".to_string(),
                template: "(<controller>(/<verb>))".to_string(),
            }
        );
    }

    #[test]
    fn index_file_is_part_of_site_base() {
        let options = EngineOptions::builder()
            .base_url("/app")
            .index_file("index.php")
            .build()
            .expect("options should build");
        let builder = UriBuilder::from_options(&options).expect("builder should build");
        let route = CompiledRoute::compile("news/<id>", ParamPatterns::new())
            .expect("template should compile");
        assert_eq!(
            builder.url(&route, &params(&[("id", "7")]), None).expect("url should build"),
            "/app/index.php/news/7"
        );
    }

    #[test]
    fn protocol_without_site_host_is_an_error() {
        let route = CompiledRoute::compile("news", ParamPatterns::new()).expect("template should compile");
        let err = UriBuilder::default()
            .url(&route, &ParamMap::new(), Some("https"))
            .expect_err("site host is required");
        assert_eq!(err, UriError::SiteHostUnavailable);
    }
}
