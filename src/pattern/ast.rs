use std::collections::BTreeSet;

/// Parsed route template: a tree of literals, placeholders and optional groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAst {
    pub nodes: Vec<TemplateNode>,
}

impl TemplateAst {
    pub fn new(nodes: Vec<TemplateNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Placeholder names in template order.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_placeholders(&self.nodes, &mut out);
        out
    }

    /// Placeholders that sit outside every optional group.
    pub fn required_params(&self) -> BTreeSet<String> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                TemplateNode::Placeholder(p) => Some(p.name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn has_placeholders(&self) -> bool {
        !self.placeholders().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    Literal(String),
    Placeholder(PlaceholderNode),
    Group(GroupNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderNode {
    pub name: String,
    /// Byte offset of the opening `<` in the template.
    pub position: usize,
}

impl PlaceholderNode {
    pub fn new(name: String, position: usize) -> Self {
        Self { name, position }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    pub nodes: Vec<TemplateNode>,
}

impl GroupNode {
    pub fn new(nodes: Vec<TemplateNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn collect_placeholders<'a>(nodes: &'a [TemplateNode], out: &mut Vec<&'a str>) {
    for node in nodes {
        match node {
            TemplateNode::Literal(_) => {}
            TemplateNode::Placeholder(p) => out.push(p.name.as_str()),
            TemplateNode::Group(group) => collect_placeholders(&group.nodes, out),
        }
    }
}
