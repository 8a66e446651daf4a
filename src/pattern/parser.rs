use hashbrown::HashSet;

use crate::pattern::ast::{GroupNode, PlaceholderNode, TemplateAst, TemplateNode};
use crate::pattern::{CompileError, CompileResult};

#[tracing::instrument(level = "trace", fields(template=%template))]
pub fn parse_template(template: &str) -> CompileResult<TemplateAst> {
    let mut parser = TemplateParser::new(template);
    let nodes = parser.parse_sequence(None)?;

    let ast = TemplateAst::new(nodes);
    validate_ast(&ast, template)?;
    Ok(ast)
}

struct TemplateParser<'a> {
    template: &'a str,
    chars: Vec<(usize, char)>,
    index: usize,
}

impl<'a> TemplateParser<'a> {
    fn new(template: &'a str) -> Self {
        let chars: Vec<(usize, char)> = template.char_indices().collect();
        Self {
            template,
            chars,
            index: 0,
        }
    }

    /// `group_start` is the byte offset of the `(` that opened this sequence.
    fn parse_sequence(&mut self, group_start: Option<usize>) -> CompileResult<Vec<TemplateNode>> {
        let mut nodes = Vec::new();
        while let Some(ch) = self.peek() {
            match ch {
                ')' => {
                    if group_start.is_some() {
                        self.next();
                        return Ok(nodes);
                    }
                    return Err(CompileError::UnexpectedClosingParenthesis {
                        template: self.template.to_string(),
                        index: self.current_byte_index(),
                    });
                }
                '(' => {
                    nodes.push(self.parse_group()?);
                }
                '<' if self.placeholder_closes() => {
                    nodes.push(self.parse_placeholder()?);
                }
                _ => {
                    nodes.push(self.parse_literal()?);
                }
            }
        }

        if let Some(start) = group_start {
            return Err(CompileError::UnterminatedGroup {
                template: self.template.to_string(),
                start,
            });
        }

        Ok(nodes)
    }

    fn parse_literal(&mut self) -> CompileResult<TemplateNode> {
        let mut literal = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                '(' | ')' => {
                    break;
                }
                '<' if self.placeholder_closes() => {
                    break;
                }
                '\\' => {
                    literal.push(self.consume_escape_char()?);
                }
                _ => {
                    literal.push(ch);
                    self.next();
                }
            }
        }
        Ok(TemplateNode::Literal(literal))
    }

    fn parse_group(&mut self) -> CompileResult<TemplateNode> {
        let start_index = self.current_byte_index();
        self.expect('(');
        let nodes = self.parse_sequence(Some(start_index))?;
        if nodes.is_empty() {
            return Err(CompileError::EmptyGroup {
                template: self.template.to_string(),
                start: start_index,
            });
        }
        Ok(TemplateNode::Group(GroupNode::new(nodes)))
    }

    fn parse_placeholder(&mut self) -> CompileResult<TemplateNode> {
        let start = self.current_byte_index();
        self.expect('<');
        let mut name = String::new();
        while let Some(ch) = self.next() {
            if ch == '>' {
                break;
            }
            name.push(ch);
        }

        let Some(first) = name.chars().next() else {
            return Err(CompileError::PlaceholderMissingName {
                template: self.template.to_string(),
                start,
            });
        };

        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(CompileError::PlaceholderInvalidStart {
                template: self.template.to_string(),
                name: name.clone(),
                start,
                found: first,
            });
        }

        if let Some(invalid) = name
            .chars()
            .skip(1)
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(CompileError::PlaceholderInvalidCharacter {
                template: self.template.to_string(),
                name: name.clone(),
                start,
                invalid,
            });
        }

        Ok(TemplateNode::Placeholder(PlaceholderNode::new(name, start)))
    }

    fn expect(&mut self, expected: char) {
        let actual = self.next();
        debug_assert_eq!(Some(expected), actual);
    }

    /// A `<` opens a placeholder only when a `>` follows before the next
    /// `<`, `(`, `)` or the end of the template. Otherwise it is literal text.
    fn placeholder_closes(&self) -> bool {
        self.chars[self.index..]
            .iter()
            .skip(1)
            .map(|(_, ch)| *ch)
            .find(|ch| matches!(ch, '>' | '<' | '(' | ')'))
            == Some('>')
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).map(|(_, ch)| *ch)
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.index += 1;
        }
        ch
    }

    fn current_byte_index(&self) -> usize {
        self.chars
            .get(self.index)
            .map(|(idx, _)| *idx)
            .unwrap_or_else(|| self.template.len())
    }

    fn consume_escape_char(&mut self) -> CompileResult<char> {
        let escape_index = self.current_byte_index();
        self.expect('\\');
        match self.next() {
            Some(ch) => Ok(ch),
            None => Err(CompileError::LoneEscapeCharacter {
                template: self.template.to_string(),
                index: escape_index,
            }),
        }
    }
}

fn validate_ast(ast: &TemplateAst, template: &str) -> CompileResult<()> {
    let mut seen = HashSet::new();
    validate_nodes(&ast.nodes, template, &mut seen)
}

fn validate_nodes<'a>(
    nodes: &'a [TemplateNode],
    template: &str,
    seen: &mut HashSet<&'a str>,
) -> CompileResult<()> {
    for node in nodes {
        match node {
            TemplateNode::Literal(_) => {}
            TemplateNode::Placeholder(p) => {
                if !seen.insert(p.name.as_str()) {
                    return Err(CompileError::DuplicatePlaceholder {
                        template: template.to_string(),
                        name: p.name.clone(),
                        start: p.position,
                    });
                }
            }
            TemplateNode::Group(group) => validate_nodes(&group.nodes, template, seen)?,
        }
    }
    Ok(())
}
