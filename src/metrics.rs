//! Raw measurements over a syntax tree
//!
//! Each traversal is a standalone function returning a value so it can be
//! tested on a bare tree without building a whole report.

use crate::profile::{FunctionName, Profile, node_text};
use serde::Serialize;
use tree_sitter::Node;

/// Conventional short names that are never naming violations.
pub const SHORT_NAME_ALLOWLIST: [&str; 12] = ["i", "j", "k", "x", "y", "z", "os", "fs", "it", "c", "ts", "js"];

/// Identifiers this short or shorter are suspect.
pub const MAX_SHORT_NAME_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    pub name: FunctionName,
    /// 1-based, inclusive
    pub line_start: usize,
    pub line_end: usize,
    pub line_count: usize,
    pub complexity: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub total_lines: usize,
    pub comment_lines: usize,
}

/// Pre-order function discovery. A function's subtree is not searched for
/// further functions, and exempt functions are dropped entirely.
#[must_use]
pub fn discover_functions(node: Node, source: &str, profile: Profile) -> Vec<FunctionRecord> {
    if profile.is_function(node) {
        if profile.is_exempt_function(node) {
            return Vec::new();
        }
        return vec![function_record(node, source, profile)];
    }
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .flat_map(|child| discover_functions(child, source, profile))
        .collect()
}

#[must_use]
pub fn function_record(node: Node, source: &str, profile: Profile) -> FunctionRecord {
    let line_start = node.start_position().row + 1;
    let line_end = node.end_position().row + 1;
    FunctionRecord {
        name: profile.extract_name(node, source),
        line_start,
        line_end,
        line_count: line_end - line_start + 1,
        complexity: compute_complexity(node, profile),
    }
}

/// Cyclomatic complexity of the subtree rooted at a function node.
///
/// A node adds one if it is a decision point, otherwise one if it is a
/// short-circuit operator; never both. Every function definition in the
/// subtree adds its base point, so nested functions inflate the enclosing
/// function's count.
#[must_use]
pub fn compute_complexity(node: Node, profile: Profile) -> usize {
    let own = usize::from(profile.is_decision_point(node) || profile.is_logical_operator(node));
    let base = usize::from(profile.is_function(node));
    let mut cursor = node.walk();
    own + base + node.children(&mut cursor).map(|c| compute_complexity(c, profile)).sum::<usize>()
}

#[must_use]
pub fn count_lines(root: Node, profile: Profile) -> LineCounts {
    LineCounts { total_lines: root.end_position().row + 1, comment_lines: count_comment_lines(root, profile) }
}

fn count_comment_lines(node: Node, profile: Profile) -> usize {
    let own = if profile.is_comment(node) { comment_span(node) } else { 0 };
    let mut cursor = node.walk();
    own + node.children(&mut cursor).map(|c| count_comment_lines(c, profile)).sum::<usize>()
}

// Line comments that own their newline end at column 0 of the next row.
fn comment_span(node: Node) -> usize {
    let start = node.start_position().row;
    let end = node.end_position();
    let end_row = if end.column == 0 && end.row > start { end.row - 1 } else { end.row };
    end_row - start + 1
}

#[must_use]
pub fn count_naming_violations(node: Node, source: &str) -> usize {
    let own = node.kind() == "identifier" && node_text(node, source).is_some_and(is_naming_violation);
    let mut cursor = node.walk();
    usize::from(own) + node.children(&mut cursor).map(|c| count_naming_violations(c, source)).sum::<usize>()
}

#[must_use]
pub fn is_naming_violation(name: &str) -> bool {
    name.chars().count() <= MAX_SHORT_NAME_LEN && !SHORT_NAME_ALLOWLIST.contains(&name)
}
