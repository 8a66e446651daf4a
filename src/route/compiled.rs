use std::collections::BTreeSet;

use regex::Regex;

use crate::enums::HttpMethod;
use crate::host::HostResolver;
use crate::matcher::match_route;
use crate::options::EngineOptions;
use crate::pattern::{CompileResult, CompiledTemplate, TemplateAst, compile_template};
use crate::reverse::{UriBuilder, UriResult};
use crate::route::{FilterOutcome, RouteDefaults, RouteFilter};
use crate::types::{ParamMap, ParamPatterns, RequestContext};

/// A route template compiled into its matching pattern plus the metadata
/// reverse building needs. Construction is builder style; once registered a
/// route is shared behind an `Arc` and never mutated.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    compiled: CompiledTemplate,
    overrides: ParamPatterns,
    defaults: RouteDefaults,
    filters: Vec<RouteFilter>,
}

impl CompiledRoute {
    pub fn compile<S: AsRef<str>>(template: S, overrides: ParamPatterns) -> CompileResult<Self> {
        Self::compile_with(template, overrides, &EngineOptions::default())
    }

    pub fn compile_with<S: AsRef<str>>(
        template: S,
        overrides: ParamPatterns,
        options: &EngineOptions,
    ) -> CompileResult<Self> {
        let compiled = compile_template(
            template.as_ref(),
            &overrides,
            &options.default_param_pattern,
        )?;
        Ok(Self {
            compiled,
            overrides,
            defaults: RouteDefaults::seeded(&options.default_action),
            filters: Vec::new(),
        })
    }

    /// Recompiles from snapshot inputs. `param_patterns` holds the pattern
    /// every placeholder was compiled with and takes precedence over
    /// `overrides`, so the restored regex does not depend on
    /// `options.default_param_pattern`.
    pub(crate) fn restore(
        template: &str,
        overrides: ParamPatterns,
        param_patterns: &ParamPatterns,
        options: &EngineOptions,
    ) -> CompileResult<Self> {
        let mut effective = overrides.clone();
        effective.extend(
            param_patterns
                .iter()
                .map(|(name, pattern)| (name.clone(), pattern.clone())),
        );
        let compiled = compile_template(template, &effective, &options.default_param_pattern)?;
        Ok(Self {
            compiled,
            overrides,
            defaults: RouteDefaults::seeded(&options.default_action),
            filters: Vec::new(),
        })
    }

    /// Merges `defaults` over the seeded ones (`action`).
    pub fn with_defaults<I, K, V>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.defaults.extend(defaults);
        self
    }

    pub fn with_default<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.defaults.insert(key, value);
        self
    }

    pub(crate) fn replace_defaults(mut self, defaults: RouteDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_filter(mut self, filter: RouteFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filter<S, F>(self, id: S, func: F) -> Self
    where
        S: Into<String>,
        F: Fn(&CompiledRoute, &ParamMap, &RequestContext<'_>) -> FilterOutcome
            + Send
            + Sync
            + 'static,
    {
        self.with_filter(RouteFilter::new(id, func))
    }

    pub fn template(&self) -> &str {
        &self.compiled.template
    }

    /// Source of the compiled regex.
    pub fn pattern(&self) -> &str {
        &self.compiled.source
    }

    pub fn regex(&self) -> &Regex {
        &self.compiled.regex
    }

    pub fn ast(&self) -> &TemplateAst {
        &self.compiled.ast
    }

    pub fn param_patterns(&self) -> &ParamPatterns {
        &self.compiled.param_patterns
    }

    /// Overrides exactly as passed at compile time.
    pub fn overrides(&self) -> &ParamPatterns {
        &self.overrides
    }

    pub fn defaults(&self) -> &RouteDefaults {
        &self.defaults
    }

    pub fn filters(&self) -> &[RouteFilter] {
        &self.filters
    }

    pub fn required_params(&self) -> &BTreeSet<String> {
        &self.compiled.required_params
    }

    /// External per the library-wide local host list.
    pub fn is_external(&self) -> bool {
        HostResolver::default().is_external(self)
    }

    pub fn matches(&self, path: &str, method: HttpMethod) -> Option<ParamMap> {
        match_route(self, path, method)
    }

    /// Reverse-builds this route with library-wide defaults.
    pub fn uri(&self, params: &ParamMap) -> UriResult<String> {
        UriBuilder::default().uri(self, params, None)
    }
}
