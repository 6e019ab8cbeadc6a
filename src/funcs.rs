//! Function discovery for Go source files.
//!
//! Parsing goes through tree-sitter so that extents come from the syntax tree,
//! not from scanning lines for `func`. Only declarations are reported: Go
//! function literals are expressions and their statements count toward the
//! declaration that contains them.

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::error::{GoatcovError, Result};

/// A function or method declaration and its inclusive line span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFunction {
    pub name: String,
    pub start_line: u32,
    pub end_line: u32,
}

/// Parse Go source and list its function declarations in textual order.
///
/// Any syntax error fails the file; `path` is only used for error messages.
pub fn find_funcs(path: &Path, source: &str) -> Result<Vec<SourceFunction>> {
    let tree = parse_go(path, source)?;
    let root = tree.root_node();

    if root.has_error() {
        let at = first_error(root).unwrap_or(root);
        let pos = at.start_position();
        return Err(GoatcovError::SourceParse {
            path: path.to_path_buf(),
            line: pos.row + 1,
            column: pos.column + 1,
        });
    }

    let mut funcs = Vec::new();
    let mut cursor = root.walk();
    for node in root.named_children(&mut cursor) {
        let kind = node.kind();
        if kind != "function_declaration" && kind != "method_declaration" {
            continue;
        }
        // Body-less declarations are implemented in assembly.
        if node.child_by_field_name("body").is_none() {
            continue;
        }
        let Some(name) = node
            .child_by_field_name("name")
            .map(|n| node_text(&n, source))
        else {
            continue;
        };

        let name = match receiver_type(&node, source) {
            Some((base, true)) => format!("(*{base}).{name}"),
            Some((base, false)) => format!("{base}.{name}"),
            None => name.to_string(),
        };

        funcs.push(SourceFunction {
            name,
            start_line: node_line(&node),
            end_line: node.end_position().row as u32 + 1,
        });
    }

    Ok(funcs)
}

fn parse_go(path: &Path, source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
    parser
        .parse(source, None)
        .ok_or_else(|| GoatcovError::SourceParse {
            path: path.to_path_buf(),
            line: 1,
            column: 1,
        })
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}

/// The receiver's base type name and whether it is a pointer receiver,
/// e.g. `(l *List[T])` gives `("List", true)`.
fn receiver_type<'a>(node: &Node<'_>, source: &'a str) -> Option<(&'a str, bool)> {
    let receiver = node.child_by_field_name("receiver")?;
    let mut cursor = receiver.walk();
    let param = receiver
        .named_children(&mut cursor)
        .find(|n| n.kind() == "parameter_declaration")?;
    let ty = node_text(&param.child_by_field_name("type")?, source);

    let ty = ty.trim().trim_start_matches('(').trim_end_matches(')').trim();
    let (ty, pointer) = match ty.strip_prefix('*') {
        Some(rest) => (rest.trim_start(), true),
        None => (ty, false),
    };
    let base = ty.split('[').next().unwrap_or(ty).trim();
    Some((base, pointer))
}

fn node_text<'a>(node: &Node<'_>, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// 1-based line of a node's first byte.
fn node_line(node: &Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}
