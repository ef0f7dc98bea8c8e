//! Per-language node classification rules
//!
//! A [`Profile`] tells the extractor which syntax node kinds are function
//! definitions, which kinds are decision points, how to name a function and
//! which functions are boilerplate that should not be scored. C++ files use
//! the C profile and TypeScript files use the JavaScript profile; the grammars
//! share statement and expression node kinds closely enough that no override
//! is needed.

use crate::discovery::Language;
use serde::{Serialize, Serializer};
use std::fmt;
use tree_sitter::Node;

pub const ANONYMOUS_FUNCTION: &str = "[anonymous function]";
pub const EXTRACTION_FAILED: &str = "[extraction_failed]";

/// Name of a discovered function, or why no name could be found.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FunctionName {
    Named(String),
    /// Function expression or lambda with no binding to name it after.
    Anonymous,
    /// The definition has no identifier where the grammar should have one.
    ExtractionFailed,
}

impl FunctionName {
    fn from_text(text: Option<&str>) -> Self {
        match text {
            Some(t) if !t.is_empty() => Self::Named(t.to_string()),
            _ => Self::ExtractionFailed,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Anonymous => ANONYMOUS_FUNCTION,
            Self::ExtractionFailed => EXTRACTION_FAILED,
        }
    }

    pub const fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FunctionName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// C and C++
    C,
    Python,
    Java,
    Rust,
    Go,
    /// JavaScript and TypeScript
    JavaScript,
}

impl Profile {
    pub const fn for_language(language: Language) -> Self {
        match language {
            Language::C | Language::Cpp => Self::C,
            Language::Python => Self::Python,
            Language::Java => Self::Java,
            Language::Rust => Self::Rust,
            Language::Go => Self::Go,
            Language::JavaScript | Language::TypeScript => Self::JavaScript,
        }
    }

    pub const fn function_kinds(&self) -> &'static [&'static str] {
        match self {
            Self::C | Self::Python => &["function_definition"],
            Self::Java => &["method_declaration", "constructor_declaration"],
            Self::Rust => &["function_item"],
            Self::Go => &["function_declaration", "method_declaration"],
            Self::JavaScript => &[
                "function_declaration",
                "function_expression",
                "generator_function_declaration",
                "generator_function",
                "arrow_function",
                "method_definition",
            ],
        }
    }

    /// Node kinds that each add one decision point.
    pub const fn complexity_kinds(&self) -> &'static [&'static str] {
        match self {
            Self::C => &[
                "if_statement",
                "for_statement",
                "while_statement",
                "do_statement",
                "case_statement",
                "catch_clause",
                "conditional_expression",
            ],
            Self::Python => &[
                "if_statement",
                "for_statement",
                "while_statement",
                "except_clause",
                "conditional_expression",
                "elif_clause",
            ],
            Self::Java => &[
                "if_statement",
                "for_statement",
                "while_statement",
                "do_statement",
                "switch_expression",
                "catch_clause",
                "ternary_expression",
            ],
            Self::Rust => &[
                "if_expression",
                "for_expression",
                "while_expression",
                "match_arm",
                "loop_expression",
            ],
            Self::Go => &[
                "if_statement",
                "for_statement",
                "expression_switch_statement",
                "type_switch_statement",
                "select_statement",
            ],
            Self::JavaScript => &[
                "if_statement",
                "for_statement",
                "for_in_statement",
                "while_statement",
                "do_statement",
                "switch_case",
                "catch_clause",
                "ternary_expression",
            ],
        }
    }

    pub const fn comment_kinds(&self) -> &'static [&'static str] {
        match self {
            Self::Rust | Self::Java => &["line_comment", "block_comment"],
            Self::C | Self::Python | Self::Go | Self::JavaScript => &["comment"],
        }
    }

    // Keyword tokens such as `function` or `if` share their text with node
    // kinds, so only named nodes are classified.
    pub fn is_function(&self, node: Node) -> bool {
        node.is_named() && self.function_kinds().contains(&node.kind())
    }

    pub fn is_decision_point(&self, node: Node) -> bool {
        node.is_named() && self.complexity_kinds().contains(&node.kind())
    }

    pub fn is_comment(&self, node: Node) -> bool {
        node.is_named() && self.comment_kinds().contains(&node.kind())
    }

    /// Short-circuit boolean combinations: `&&`/`||`, or Python's `and`/`or`.
    pub fn is_logical_operator(&self, node: Node) -> bool {
        match self {
            Self::Python => node.kind() == "boolean_operator",
            _ => {
                node.kind() == "binary_expression"
                    && node
                        .child_by_field_name("operator")
                        .is_some_and(|op| matches!(op.kind(), "&&" | "||"))
            }
        }
    }

    /// Operator overloads and destructors are structural, not logic, and are left out of scoring.
    pub fn is_exempt_function(&self, node: Node) -> bool {
        match self {
            Self::C => node
                .child_by_field_name("declarator")
                .or_else(|| node.child_by_field_name("abstract_declarator"))
                .is_some_and(|decl| {
                    contains_kind(decl, "operator_name") || contains_kind(decl, "destructor_name")
                }),
            _ => false,
        }
    }

    pub fn extract_name(&self, node: Node, source: &str) -> FunctionName {
        match self {
            Self::C => node
                .child_by_field_name("declarator")
                .and_then(find_identifier)
                .map_or(FunctionName::ExtractionFailed, |id| {
                    FunctionName::from_text(node_text(id, source))
                }),
            Self::Python | Self::Java | Self::Rust | Self::Go => {
                FunctionName::from_text(name_field_text(node, source))
            }
            Self::JavaScript => js_function_name(node, source),
        }
    }
}

fn js_function_name(node: Node, source: &str) -> FunctionName {
    if let Some(name) = name_field_text(node, source).filter(|n| !n.is_empty()) {
        return FunctionName::Named(name.to_string());
    }
    if node.kind() == "arrow_function"
        && let Some(parent) = node.parent()
        && parent.kind() == "variable_declarator"
        && let Some(name) = name_field_text(parent, source).filter(|n| !n.is_empty())
    {
        return FunctionName::Named(name.to_string());
    }
    FunctionName::Anonymous
}

fn name_field_text<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    node.child_by_field_name("name").and_then(|n| node_text(n, source))
}

pub fn node_text<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    node.utf8_text(source.as_bytes()).ok()
}

/// First identifier in pre-order. C/C++ bury the name inside pointer, array,
/// function and qualified declarators; in-class method names are field identifiers.
fn find_identifier(node: Node) -> Option<Node> {
    if matches!(node.kind(), "identifier" | "field_identifier") {
        return Some(node);
    }
    let mut cursor = node.walk();
    node.children(&mut cursor).find_map(find_identifier)
}

fn contains_kind(node: Node, kind: &str) -> bool {
    if node.kind() == kind {
        return true;
    }
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|c| contains_kind(c, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{find_first, parse_snippet};

    #[test]
    fn test_profile_delegation() {
        assert_eq!(Profile::for_language(Language::Cpp), Profile::for_language(Language::C));
        assert_eq!(
            Profile::for_language(Language::TypeScript),
            Profile::for_language(Language::JavaScript)
        );
        assert_eq!(Profile::for_language(Language::Go), Profile::Go);
    }

    #[test]
    fn test_function_name_rendering() {
        assert_eq!(FunctionName::Named("run".into()).to_string(), "run");
        assert_eq!(FunctionName::Anonymous.to_string(), "[anonymous function]");
        assert_eq!(FunctionName::ExtractionFailed.to_string(), "[extraction_failed]");
        assert!(!FunctionName::Anonymous.is_named());
        assert_eq!(FunctionName::from_text(Some("")), FunctionName::ExtractionFailed);
        assert_eq!(FunctionName::from_text(None), FunctionName::ExtractionFailed);
    }

    #[test]
    fn test_function_name_serializes_as_text() {
        let json = serde_json::to_string(&vec![FunctionName::Named("f".into()), FunctionName::Anonymous]).unwrap();
        assert_eq!(json, r#"["f","[anonymous function]"]"#);
    }

    #[test]
    fn test_c_name_through_pointer_declarator() {
        let p = parse_snippet(Language::C, "static char *dup_string(const char *s) { return 0; }\n");
        let func = find_first(&p, "function_definition").unwrap();
        assert_eq!(Profile::C.extract_name(func, &p.source), FunctionName::Named("dup_string".into()));
    }

    #[test]
    fn test_cpp_qualified_and_inline_method_names() {
        let p = parse_snippet(
            Language::Cpp,
            "class Widget {\n public:\n  int size() { return 0; }\n};\nvoid Widget::draw() {}\n",
        );
        let profile = Profile::for_language(Language::Cpp);
        let root = p.tree.root_node();
        let mut names = Vec::new();
        crate::test_utils::visit(root, &mut |n| {
            if profile.is_function(n) {
                names.push(profile.extract_name(n, &p.source).to_string());
            }
        });
        assert_eq!(names, vec!["size", "draw"]);
    }

    #[test]
    fn test_cpp_exemptions() {
        let p = parse_snippet(
            Language::Cpp,
            "struct V {\n  ~V() {}\n  bool operator==(const V& o) const { return true; }\n  void keep() {}\n};\n",
        );
        let profile = Profile::C;
        let mut exempt = Vec::new();
        crate::test_utils::visit(p.tree.root_node(), &mut |n| {
            if profile.is_function(n) {
                exempt.push(profile.is_exempt_function(n));
            }
        });
        assert_eq!(exempt, vec![true, true, false]);
    }

    #[test]
    fn test_python_logical_operator() {
        let p = parse_snippet(Language::Python, "ok = a and b or c\n");
        let mut count = 0;
        crate::test_utils::visit(p.tree.root_node(), &mut |n| {
            count += usize::from(Profile::Python.is_logical_operator(n));
        });
        assert_eq!(count, 2);
    }

    #[test]
    fn test_binary_logical_operator_ignores_arithmetic() {
        let p = parse_snippet(Language::Go, "package main\nvar v = (a && b) || c + 1 > 2\n");
        let mut count = 0;
        crate::test_utils::visit(p.tree.root_node(), &mut |n| {
            count += usize::from(Profile::Go.is_logical_operator(n));
        });
        assert_eq!(count, 2);
    }

    #[test]
    fn test_js_arrow_function_named_by_binding() {
        let p = parse_snippet(Language::JavaScript, "const handler = (e) => e;\n[1].map((x) => x);\n");
        let mut names = Vec::new();
        crate::test_utils::visit(p.tree.root_node(), &mut |n| {
            if Profile::JavaScript.is_function(n) {
                names.push(Profile::JavaScript.extract_name(n, &p.source));
            }
        });
        assert_eq!(names, vec![FunctionName::Named("handler".into()), FunctionName::Anonymous]);
    }

    #[test]
    fn test_function_keyword_token_is_not_a_function() {
        let p = parse_snippet(Language::JavaScript, "function noop() {}\nconst f = function () {};\n");
        let mut kinds = Vec::new();
        crate::test_utils::visit(p.tree.root_node(), &mut |n| {
            if Profile::JavaScript.is_function(n) {
                kinds.push(n.kind());
            }
        });
        assert_eq!(kinds, vec!["function_declaration", "function_expression"]);
    }

    #[test]
    fn test_js_generator_named() {
        let p = parse_snippet(Language::JavaScript, "function* ids() { yield 1; }\n");
        let func = find_first(&p, "generator_function_declaration").unwrap();
        assert!(Profile::JavaScript.is_function(func));
        assert_eq!(Profile::JavaScript.extract_name(func, &p.source), FunctionName::Named("ids".into()));
    }

    #[test]
    fn test_rust_comment_kinds() {
        assert!(Profile::Rust.comment_kinds().contains(&"line_comment"));
        assert_eq!(Profile::Python.comment_kinds(), &["comment"]);
    }
}
