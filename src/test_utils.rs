//! Test utilities for parsing source snippets in unit tests.

use crate::discovery::Language;
use crate::parsing::{ParsedFile, create_parser, parse_source};
use std::path::Path;
use tree_sitter::Node;

/// Parse a snippet in `language`. Panics on syntax errors.
pub fn parse_snippet(language: Language, code: &str) -> ParsedFile {
    let mut parser = create_parser(language).unwrap();
    parse_source(&mut parser, code.to_string(), language, Path::new("snippet")).unwrap()
}

/// First node of `kind` in pre-order.
pub fn find_first<'a>(parsed: &'a ParsedFile, kind: &str) -> Option<Node<'a>> {
    let mut found = None;
    visit(parsed.tree.root_node(), &mut |n| {
        if found.is_none() && n.kind() == kind {
            found = Some(n);
        }
    });
    found
}

pub fn visit<'t>(node: Node<'t>, f: &mut impl FnMut(Node<'t>)) {
    f(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, f);
    }
}
