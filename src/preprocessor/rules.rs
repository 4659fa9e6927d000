//! Normalization rules.

use unparser_syntax::ast::{Child, Node, NodeType};

use super::{PreprocessError, PreprocessResult, Rule, Visit, preprocess};
use crate::quote::{percent_r_closing, transquote};

/// Rebuild with preprocessed children; type, payloads and location stay as they are.
pub struct Noop;

impl Rule for Noop {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn result(&self, visit: &Visit<'_>) -> PreprocessResult<Node> {
        Ok(visit.node().updated(visit.visited_children()?.to_vec()))
    }
}

/// Merge runs of adjacent `str` segments; a node made only of string content becomes a single `str`.
///
/// Empty `str` segments next to other segments are dropped, since `"#{a}" "" "#{b}"` and `"#{a}#{b}"` are the same
/// string.
pub struct CollapseStrChildren;

impl Rule for CollapseStrChildren {
    fn name(&self) -> &'static str {
        "collapse_str_children"
    }

    fn result(&self, visit: &Visit<'_>) -> PreprocessResult<Node> {
        let mut merged: Vec<Child> = Vec::new();
        let mut run: Option<String> = None;
        for child in visit.visited_children()? {
            match str_segment(child)? {
                Some(value) => run.get_or_insert_with(String::new).push_str(value),
                None => {
                    if let Some(text) = run.take() {
                        merged.push(str_node(text));
                    }
                    merged.push(child.clone());
                }
            }
        }
        if let Some(text) = run.take() {
            merged.push(str_node(text));
        }
        if merged.len() > 1 {
            merged.retain(|child| !matches!(str_segment(child), Ok(Some(""))));
        }

        if merged.iter().any(|child| !child.is_node_of(NodeType::Str)) {
            return Ok(visit.node().updated(merged));
        }
        let mut text = String::new();
        for child in &merged {
            if let Some(value) = str_segment(child)? {
                text.push_str(value);
            }
        }
        Ok(Node::new(NodeType::Str, vec![Child::Str(text)]))
    }
}

/// Move a `%r` pattern's string segments to slash quoting, so `%r{a/b}` and `/a\/b/` normalize alike.
///
/// Nodes without a `%r` opening delimiter in their location pass through unchanged.
pub struct RegexpQuoting;

impl Rule for RegexpQuoting {
    fn name(&self) -> &'static str {
        "regexp_quoting"
    }

    fn result(&self, visit: &Visit<'_>) -> PreprocessResult<Node> {
        let node = visit.node();
        let from = node
            .location()
            .and_then(|location| location.begin_source())
            .and_then(percent_r_closing);
        let Some(from) = from else {
            return Ok(node.clone());
        };

        let children = visit
            .children()
            .iter()
            .map(|child| -> PreprocessResult<Child> {
                match (child, str_segment(child)?) {
                    (Child::Node(segment), Some(value)) => {
                        let requoted = transquote(value, from, '/')?;
                        Ok(Child::Node(segment.updated(vec![Child::Str(requoted)])))
                    }
                    _ => Ok(child.clone()),
                }
            })
            .collect::<PreprocessResult<Vec<_>>>()?;
        Ok(node.updated(children))
    }
}

/// A `begin` with exactly one child is that child, normalized in full; any other `begin` is kept.
pub struct RedundantBegin;

impl Rule for RedundantBegin {
    fn name(&self) -> &'static str {
        "redundant_begin"
    }

    fn result(&self, visit: &Visit<'_>) -> PreprocessResult<Node> {
        match visit.children() {
            [Child::Node(only)] => preprocess(only),
            _ => Noop.result(visit),
        }
    }
}

/// The value of a `str` node child, `None` for any other child.
fn str_segment(child: &Child) -> PreprocessResult<Option<&str>> {
    match child {
        Child::Node(node) if node.kind() == NodeType::Str => match node.children() {
            [Child::Str(value)] => Ok(Some(value)),
            _ => Err(PreprocessError::defect(NodeType::Str, "expected a single string value")),
        },
        _ => Ok(None),
    }
}

fn str_node(text: String) -> Child {
    Child::Node(Node::new(NodeType::Str, vec![Child::Str(text)]))
}
