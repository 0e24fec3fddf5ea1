//! # markup-context-syntax
//!
//! A structural view of markup-capable source code (JavaScript/TypeScript
//! with embedded tags), built for one question: *what kind of region is this
//! byte offset in?*
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → tree-sitter (TSX grammar) → Sink → SyntaxTree (arena)
//! ```
//!
//! ### 1. Parsing ([`parser`] module)
//!
//! The TSX grammar resolves the `<` ambiguity structurally: a generic
//! argument list, a comparison and a tag open are different grammar rules,
//! not different guesses.
//!
//! ### 2. Sink ([`parser::sink`] module)
//!
//! Flattens the tree-sitter tree into a pre-order `Vec` of nodes with integer
//! parent links, mapping node kind strings onto [`SyntaxKind`] once.
//!
//! ### 3. Tree ([`tree`] module)
//!
//! The arena supports the handful of queries the classifier needs:
//! deepest covering node, ancestor walk, and the delimiter positions of an
//! element or fragment. Nodes are never mutated after the sink is done.
//!
//! ## Quick Start
//!
//! ```
//! use markup_context_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("const el = <b>bold</b>;");
//! assert!(tree.has_markup());
//!
//! let text = tree.covering_node(16).unwrap();
//! assert_eq!(tree.kind(text), SyntaxKind::JSX_TEXT);
//! ```

pub mod parser;
pub mod syntax_kind;
pub mod tree;

pub use parser::parse;
pub use syntax_kind::SyntaxKind;
pub use tree::{Ancestors, Node, NodeId, SyntaxTree};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    /// Format only the markup-relevant part of a tree.
    ///
    /// Statement wrappers, identifiers and punctuation vary between grammar
    /// releases; the markup skeleton is what the classifier depends on.
    fn format_markup(tree: &SyntaxTree) -> String {
        let mut result = String::new();
        for (id, node) in tree.nodes() {
            if !is_markup_kind(node.kind) {
                continue;
            }
            let depth = tree
                .ancestors(id)
                .skip(1)
                .filter(|&a| is_markup_kind(tree.kind(a)))
                .count();
            result.push_str(&format!(
                "{}{:?}@{}..{}\n",
                "  ".repeat(depth),
                node.kind,
                node.start,
                node.end
            ));
        }
        result
    }

    fn is_markup_kind(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::JSX_ELEMENT
                | SyntaxKind::JSX_FRAGMENT
                | SyntaxKind::JSX_OPENING_ELEMENT
                | SyntaxKind::JSX_CLOSING_ELEMENT
                | SyntaxKind::JSX_SELF_CLOSING_ELEMENT
                | SyntaxKind::JSX_TAG_NAME
                | SyntaxKind::JSX_ATTRIBUTE_LIST
                | SyntaxKind::JSX_ATTRIBUTE
                | SyntaxKind::JSX_EXPRESSION
                | SyntaxKind::JSX_TEXT
        )
    }

    #[test]
    fn snapshot_element_with_attribute_and_expression() {
        let tree = parse(r#"<div className="a">Hi{name}</div>"#);
        assert_snapshot!(format_markup(&tree), @r"
        JSX_ELEMENT@0..33
          JSX_OPENING_ELEMENT@0..19
            JSX_TAG_NAME@1..4
            JSX_ATTRIBUTE_LIST@5..18
              JSX_ATTRIBUTE@5..18
          JSX_TEXT@19..21
          JSX_EXPRESSION@21..27
          JSX_CLOSING_ELEMENT@27..33
            JSX_TAG_NAME@29..32
        ");
    }

    #[test]
    fn snapshot_self_closing_inside_element() {
        let tree = parse("<p>a<br/>b</p>");
        assert_snapshot!(format_markup(&tree), @r"
        JSX_ELEMENT@0..14
          JSX_OPENING_ELEMENT@0..3
            JSX_TAG_NAME@1..2
          JSX_TEXT@3..4
          JSX_SELF_CLOSING_ELEMENT@4..9
            JSX_TAG_NAME@5..7
          JSX_TEXT@9..10
          JSX_CLOSING_ELEMENT@10..14
            JSX_TAG_NAME@12..13
        ");
    }

    #[test]
    fn no_markup_in_plain_code() {
        let tree = parse("function f<T>(x: T): Array<T> { return x < 1 ? [x] : []; }");
        assert_snapshot!(format_markup(&tree), @"");
    }

    #[test]
    fn covering_node_inside_nested_expression() {
        let source = "<div>{ok && <b>X</b>}</div>";
        let tree = parse(source);
        let x = source.find('X').unwrap();
        let id = tree.covering_node(x).unwrap();
        assert_eq!(tree.kind(id), SyntaxKind::JSX_TEXT);
        assert!(
            tree.ancestors(id)
                .any(|a| tree.kind(a) == SyntaxKind::JSX_EXPRESSION)
        );
    }
}
