use std::collections::{BTreeMap, BTreeSet};

use regex::{Regex, escape};

use super::ast::{TemplateAst, TemplateNode};
use super::{CompileError, CompileResult, parse_template};

/// Printable characters except `/ . , ; ?` and newline.
pub const DEFAULT_PARAM_PATTERN: &str = "[^/.,;?\\n]+";

/// Output of the pattern compiler. Pure function of template, overrides and
/// default segment pattern.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    pub template: String,
    pub ast: TemplateAst,
    pub param_patterns: BTreeMap<String, String>,
    pub required_params: BTreeSet<String>,
    pub source: String,
    pub regex: Regex,
}

impl PartialEq for CompiledTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template
            && self.param_patterns == other.param_patterns
            && self.source == other.source
    }
}

#[tracing::instrument(level = "trace", skip(overrides), fields(template=%template))]
pub fn compile_template(
    template: &str,
    overrides: &BTreeMap<String, String>,
    default_param_pattern: &str,
) -> CompileResult<CompiledTemplate> {
    let ast = parse_template(template)?;

    let mut param_patterns = BTreeMap::new();
    for name in ast.placeholders() {
        let pattern = overrides
            .get(name)
            .map(String::as_str)
            .unwrap_or(default_param_pattern);
        validate_param_pattern(template, name, pattern)?;
        param_patterns.insert(name.to_string(), pattern.to_string());
    }

    let source = build_regex(&ast.nodes, &param_patterns);
    let regex = Regex::new(&source).map_err(|err| CompileError::InvalidPattern {
        template: template.to_string(),
        error: err.to_string(),
    })?;
    let required_params = ast.required_params();

    Ok(CompiledTemplate {
        template: template.to_string(),
        ast,
        param_patterns,
        required_params,
        source,
        regex,
    })
}

pub fn to_regex(
    template: &str,
    overrides: &BTreeMap<String, String>,
    default_param_pattern: &str,
) -> CompileResult<String> {
    compile_template(template, overrides, default_param_pattern).map(|compiled| compiled.source)
}

fn validate_param_pattern(template: &str, name: &str, pattern: &str) -> CompileResult<()> {
    let source = format!("^(?:{})$", pattern);
    if let Err(err) = Regex::new(&source) {
        return Err(CompileError::InvalidRegex {
            template: template.to_string(),
            name: name.to_string(),
            error: err.to_string(),
        });
    }
    Ok(())
}

fn build_regex(nodes: &[TemplateNode], param_patterns: &BTreeMap<String, String>) -> String {
    let mut regex = String::from("^");
    regex.push_str(&nodes_to_regex(nodes, param_patterns));
    regex.push('$');
    regex
}

fn nodes_to_regex(nodes: &[TemplateNode], param_patterns: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for node in nodes {
        out.push_str(&node_to_regex(node, param_patterns));
    }
    out
}

fn node_to_regex(node: &TemplateNode, param_patterns: &BTreeMap<String, String>) -> String {
    match node {
        TemplateNode::Literal(value) => escape(value),
        TemplateNode::Placeholder(p) => {
            let body = param_patterns
                .get(&p.name)
                .map(String::as_str)
                .unwrap_or(DEFAULT_PARAM_PATTERN);
            format!("(?P<{}>{})", p.name, body)
        }
        TemplateNode::Group(group) => {
            format!("(?:{})?", nodes_to_regex(&group.nodes, param_patterns))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn renders_custom_patterns_and_nested_groups() {
        let source = to_regex(
            "<controller>(/<action>(/<id>))",
            &overrides(&[("controller", "[a-z]+"), ("id", "\\d+")]),
            DEFAULT_PARAM_PATTERN,
        )
        .expect("template should compile");

        assert_eq!(
            source,
            "^(?P<controller>[a-z]+)(?:/(?P<action>[^/.,;?\\n]+)(?:/(?P<id>\\d+))?)?$"
        );
    }

    #[test]
    fn escapes_regex_metacharacters_in_literals() {
        let source = to_regex("feed.rss", &BTreeMap::new(), DEFAULT_PARAM_PATTERN)
            .expect("template should compile");
        assert_eq!(source, "^feed\\.rss$");
    }

    #[test]
    fn ignores_overrides_for_unknown_placeholders() {
        let compiled = compile_template(
            "<id>",
            &overrides(&[("slug", "[a-z-]+")]),
            DEFAULT_PARAM_PATTERN,
        )
        .expect("template should compile");
        assert_eq!(compiled.param_patterns.len(), 1);
        assert!(compiled.param_patterns.contains_key("id"));
    }

    #[test]
    fn rejects_invalid_override() {
        let err = compile_template("<id>", &overrides(&[("id", "[")]), DEFAULT_PARAM_PATTERN)
            .expect_err("invalid override should fail");
        match err {
            CompileError::InvalidRegex { name, .. } => assert_eq!(name, "id"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn colliding_group_name_in_override_is_a_pattern_error() {
        let err = compile_template(
            "<id>/<slug>",
            &overrides(&[("id", "(?P<slug>[a-z]+)")]),
            DEFAULT_PARAM_PATTERN,
        )
        .expect_err("two groups named slug");
        match err {
            CompileError::InvalidPattern { template, .. } => assert_eq!(template, "<id>/<slug>"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn required_params_exclude_grouped_placeholders() {
        let compiled = compile_template(
            "<controller>/<action>(/<id>)",
            &BTreeMap::new(),
            DEFAULT_PARAM_PATTERN,
        )
        .expect("template should compile");
        let required: Vec<&str> = compiled.required_params.iter().map(String::as_str).collect();
        assert_eq!(required, vec!["action", "controller"]);
    }
}
