//! # Arena Syntax Tree
//!
//! The parsed program is stored as a flat `Vec<Node>` in pre-order. Each node
//! records its parent as an index into the same vector, so walking towards the
//! root is a loop over integers and the whole tree is dropped in one go when
//! the query is done.
//!
//! ```text
//! <div>Hi</div>
//!
//! 0 ROOT                 parent: None
//! 1 NODE (statement)     parent: 0
//! 2 JSX_ELEMENT          parent: 1
//! 3 JSX_OPENING_ELEMENT  parent: 2
//! ...
//! ```
//!
//! Spans are half-open byte ranges `[start, end)`.

use crate::syntax_kind::SyntaxKind;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: SyntaxKind,
    pub start: usize,
    pub end: usize,
    pub parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Whether `offset` lies in the half-open span of this node.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Whether `offset` lies between this node's first and last byte,
    /// excluding both edges.
    pub fn strictly_contains(&self, offset: usize) -> bool {
        self.start < offset && offset < self.end
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Read-only tree produced by [`parse`](crate::parse).
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
}

impl SyntaxTree {
    /// A tree with no nodes at all; every query on it misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId(0))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.node(id).kind
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in pre-order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    /// Whether any element, fragment or self-closing tag exists.
    pub fn has_markup(&self) -> bool {
        self.nodes.iter().any(|node| node.kind.is_markup())
    }

    /// The deepest node whose span contains `offset`.
    ///
    /// Children are ordered by position and never overlap, so at most one
    /// child of any node can contain the offset.
    pub fn covering_node(&self, offset: usize) -> Option<NodeId> {
        let mut current = self.root()?;
        if !self.node(current).contains(offset) {
            return None;
        }
        while let Some(&child) = self
            .node(current)
            .children
            .iter()
            .find(|&&child| self.node(child).contains(offset))
        {
            current = child;
        }
        Some(current)
    }

    /// `id` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn child_of_kind(&self, id: NodeId, kind: SyntaxKind) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.kind(child) == kind)
    }

    /// End of the `<tag ...>` (or `<>`) that opens an element or fragment.
    pub fn opening_delimiter_end(&self, id: NodeId) -> Option<usize> {
        if let Some(open) = self.child_of_kind(id, SyntaxKind::JSX_OPENING_ELEMENT) {
            return Some(self.node(open).end);
        }
        // Fragments from grammars without opening/closing nodes keep bare tokens
        self.child_of_kind(id, SyntaxKind::R_ANGLE)
            .map(|token| self.node(token).end)
    }

    /// Start of the `</tag>` (or `</>`) that closes an element or fragment.
    pub fn closing_delimiter_start(&self, id: NodeId) -> Option<usize> {
        if let Some(close) = self.child_of_kind(id, SyntaxKind::JSX_CLOSING_ELEMENT) {
            return Some(self.node(close).start);
        }
        self.children(id)
            .iter()
            .rev()
            .copied()
            .find(|&child| self.kind(child) == SyntaxKind::L_ANGLE)
            .map(|token| self.node(token).start)
    }

    /// Append a node; used by the sink while walking the parser output.
    pub(crate) fn push(
        &mut self,
        kind: SyntaxKind,
        start: usize,
        end: usize,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            start,
            end,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    pub(crate) fn extend_end(&mut self, id: NodeId, end: usize) {
        let node = &mut self.nodes[id.index()];
        node.end = node.end.max(end);
    }
}

/// Iterator returned by [`SyntaxTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.node(current).parent;
        Some(current)
    }
}
