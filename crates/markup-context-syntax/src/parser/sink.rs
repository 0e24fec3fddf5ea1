//! Sink for flattening a tree-sitter tree into the arena [`SyntaxTree`].
//!
//! The walk is iterative (a `TreeCursor` plus an explicit stack of arena
//! parents), so nesting depth is bounded by heap, not by the call stack.
//! Three pieces of structure are added on the way:
//!
//! - `jsx_element`s whose opening tag has no name become `JSX_FRAGMENT`
//! - the `name` field of any tag becomes `JSX_TAG_NAME`
//! - the attributes of an opening tag are wrapped in one `JSX_ATTRIBUTE_LIST`

use std::collections::HashMap;

use tree_sitter::{Node as TsNode, Tree};

use crate::syntax_kind::SyntaxKind;
use crate::tree::{NodeId, SyntaxTree};

/// Converts a tree-sitter tree into a [`SyntaxTree`].
pub struct Sink {
    tree: SyntaxTree,
    /// Open attribute list per tag node, created lazily on the first attribute
    attribute_lists: HashMap<NodeId, NodeId>,
}

impl Sink {
    pub fn new() -> Self {
        Self {
            tree: SyntaxTree::empty(),
            attribute_lists: HashMap::new(),
        }
    }

    /// Consume the sink and build the arena from `source_tree`.
    pub fn finish(mut self, source_tree: &Tree) -> SyntaxTree {
        let mut cursor = source_tree.walk();
        let mut parents: Vec<NodeId> = Vec::new();

        loop {
            let node = cursor.node();
            let field = cursor.field_name();
            let id = self.enter(node, field, parents.last().copied());

            if cursor.goto_first_child() {
                parents.push(id);
                continue;
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return self.tree;
                }
                parents.pop();
            }
        }
    }

    fn enter(&mut self, node: TsNode<'_>, field: Option<&str>, parent: Option<NodeId>) -> NodeId {
        let kind = Self::kind_of(node, field, parent.map(|p| self.tree.kind(p)));
        let (start, end) = (node.start_byte(), node.end_byte());
        let parent = match parent {
            Some(tag) if self.tree.kind(tag).is_opening_tag() => {
                Some(self.attribute_parent(tag, kind, start, end))
            }
            other => other,
        };
        self.tree.push(kind, start, end, parent)
    }

    fn kind_of(node: TsNode<'_>, field: Option<&str>, parent: Option<SyntaxKind>) -> SyntaxKind {
        let kind = SyntaxKind::from_tree_sitter(node.kind(), node.is_named());
        if field == Some("name") && parent.is_some_and(SyntaxKind::is_tag) {
            return SyntaxKind::JSX_TAG_NAME;
        }
        if kind == SyntaxKind::JSX_ELEMENT && Self::is_fragment(node) {
            return SyntaxKind::JSX_FRAGMENT;
        }
        kind
    }

    /// `<>...</>`: the opening tag carries no name.
    fn is_fragment(element: TsNode<'_>) -> bool {
        element
            .named_child(0)
            .filter(|open| open.kind() == "jsx_opening_element")
            .is_some_and(|open| open.child_by_field_name("name").is_none())
    }

    /// Decide where a child of an opening tag hangs: directly on the tag, or
    /// inside the tag's attribute list.
    fn attribute_parent(&mut self, tag: NodeId, kind: SyntaxKind, start: usize, end: usize) -> NodeId {
        let is_attribute = matches!(
            kind,
            SyntaxKind::JSX_ATTRIBUTE | SyntaxKind::JSX_EXPRESSION
        );
        match self.attribute_lists.get(&tag).copied() {
            Some(list) if is_attribute || kind == SyntaxKind::COMMENT => {
                self.tree.extend_end(list, end);
                list
            }
            Some(_) => tag,
            None if is_attribute => {
                let list = self
                    .tree
                    .push(SyntaxKind::JSX_ATTRIBUTE_LIST, start, end, Some(tag));
                self.attribute_lists.insert(tag, list);
                list
            }
            None => tag,
        }
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::new()
    }
}
