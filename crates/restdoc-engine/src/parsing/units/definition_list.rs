use crate::models::{Definition, DefinitionList, Node};
use crate::parsing::{buffer::Buffer, classify, env::Environment, source::LineView};

use super::{ParsingUnit, dedent, paragraphs};

const CLASSIFIER_SEPARATOR: &str = " : ";

/// Terms followed by indented definitions. The first term is already in the
/// buffer when the unit starts.
#[derive(Debug, Clone, Default)]
pub struct DefinitionListUnit;

impl DefinitionListUnit {
    pub fn new() -> Self {
        Self
    }
}

impl ParsingUnit for DefinitionListUnit {
    fn accept(&mut self, line: &LineView<'_>, buffer: &mut Buffer) -> bool {
        let is_term = line.next.is_some_and(classify::is_definition_list);
        if !classify::is_block_line(line.text) && !is_term {
            return false;
        }
        buffer.push(line.text);
        true
    }

    fn finish(&mut self, buffer: &Buffer, env: &mut Environment) -> Node {
        let mut entries: Vec<(&str, Vec<String>)> = Vec::new();
        for line in buffer.lines() {
            if !classify::is_block_line(line) {
                entries.push((line.as_str(), Vec::new()));
            } else if let Some((_, body)) = entries.last_mut() {
                body.push(line.clone());
            }
        }

        let items = entries
            .into_iter()
            .map(|(term_line, body)| {
                let mut parts = term_line.trim().split(CLASSIFIER_SEPARATOR);
                let term = env.inline(parts.next().unwrap_or_default());
                let classifiers = parts.map(|part| env.inline(part.trim())).collect();
                let paragraphs = paragraphs(&dedent(&body))
                    .iter()
                    .map(|text| env.inline(text))
                    .collect();
                Definition {
                    term,
                    classifiers,
                    paragraphs,
                }
            })
            .collect();

        Node::DefinitionList(DefinitionList { items })
    }
}
