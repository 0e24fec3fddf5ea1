//! # Parser - Producing the Arena Tree
//!
//! Parsing is delegated to the tree-sitter TSX grammar, which already knows
//! how to tell `a < b`, `useState<string>()` and `<div>` apart and which
//! always returns a tree, even for half-typed input (broken regions become
//! `ERROR` nodes). The [`sink`] then flattens that tree into our arena.
//!
//! ```text
//! Source Text → tree-sitter (TSX) → tree_sitter::Tree → Sink → SyntaxTree
//! ```
//!
//! The TSX grammar is a superset of what we need for plain JavaScript with
//! embedded markup, so one grammar serves every code dialect.

pub mod sink;

use tree_sitter::Parser;

use crate::tree::SyntaxTree;
use sink::Sink;

/// Parse markup-capable source into an arena syntax tree.
///
/// Never fails: if the grammar cannot be loaded or the parser gives up, the
/// result is an empty tree, which contains no markup.
pub fn parse(source: &str) -> SyntaxTree {
    let mut parser = Parser::new();
    if let Err(err) = parser.set_language(&tree_sitter_typescript::LANGUAGE_TSX.into()) {
        log::warn!("TSX grammar unavailable: {err}");
        return SyntaxTree::empty();
    }

    match parser.parse(source, None) {
        Some(tree) => Sink::new().finish(&tree),
        None => SyntaxTree::empty(),
    }
}
