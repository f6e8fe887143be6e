//! Concrete syntax tree handles.
//!
//! Nodes and leaves are cheap-to-clone handles over shared, immutable tree
//! data. A tree is never mutated once built; linters and rules only read it.

use super::token::TokenInfo;
use std::sync::{Arc, Weak};

/// Distinguishes leaves from nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A token.
    Leaf,
    /// An interior node with children.
    Node,
}

/// Kind plus language-specific tag of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolTag {
    /// Leaf or node.
    pub kind: SymbolKind,
    /// Node tag, or the token kind for leaves.
    pub tag: i32,
}

/// A leaf of the syntax tree, wrapping one token.
#[derive(Debug, Clone)]
pub struct SyntaxTreeLeaf(Arc<TokenInfo>);

impl SyntaxTreeLeaf {
    /// Creates a leaf for `token`.
    #[must_use]
    pub fn new(token: TokenInfo) -> Self {
        Self(Arc::new(token))
    }

    /// Returns the wrapped token.
    #[must_use]
    pub fn token(&self) -> &TokenInfo {
        &self.0
    }

    /// Returns the leaf tag (the token kind).
    #[must_use]
    pub fn tag(&self) -> SymbolTag {
        SymbolTag {
            kind: SymbolKind::Leaf,
            tag: self.0.token_enum(),
        }
    }

    /// Returns true if both handles refer to the same leaf.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug)]
struct NodeData {
    tag: i32,
    children: Vec<Option<Symbol>>,
}

/// An interior node of the syntax tree.
///
/// Children are ordered and may be null (elided by the parser).
#[derive(Debug, Clone)]
pub struct SyntaxTreeNode(Arc<NodeData>);

impl SyntaxTreeNode {
    /// Creates a node with the given tag and children.
    #[must_use]
    pub fn new(tag: i32, children: Vec<Option<Symbol>>) -> Self {
        Self(Arc::new(NodeData { tag, children }))
    }

    /// Returns the language-specific node tag.
    #[must_use]
    pub fn tag(&self) -> i32 {
        self.0.tag
    }

    /// Returns the node's symbol tag.
    #[must_use]
    pub fn symbol_tag(&self) -> SymbolTag {
        SymbolTag {
            kind: SymbolKind::Node,
            tag: self.0.tag,
        }
    }

    /// Returns the children, including null ones.
    #[must_use]
    pub fn children(&self) -> &[Option<Symbol>] {
        &self.0.children
    }

    /// Returns the child at `index`, if present and non-null.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Symbol> {
        self.0.children.get(index).and_then(Option::as_ref)
    }

    /// Returns true if this node has tag `tag`.
    #[must_use]
    pub fn matches_tag(&self, tag: i32) -> bool {
        self.0.tag == tag
    }

    /// Returns true if this node's tag is any of `tags`.
    #[must_use]
    pub fn matches_tag_any_of(&self, tags: &[i32]) -> bool {
        tags.contains(&self.0.tag)
    }

    /// Returns true if both handles refer to the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A syntax tree symbol: a leaf or a node.
#[derive(Debug, Clone)]
pub enum Symbol {
    /// A token leaf.
    Leaf(SyntaxTreeLeaf),
    /// An interior node.
    Node(SyntaxTreeNode),
}

impl Symbol {
    /// Creates a leaf symbol for `token`.
    #[must_use]
    pub fn leaf(token: TokenInfo) -> Self {
        Self::Leaf(SyntaxTreeLeaf::new(token))
    }

    /// Creates a node symbol with the given tag and children.
    #[must_use]
    pub fn node(tag: i32, children: Vec<Option<Symbol>>) -> Self {
        Self::Node(SyntaxTreeNode::new(tag, children))
    }

    /// Returns whether this is a leaf or a node.
    #[must_use]
    pub fn kind(&self) -> SymbolKind {
        match self {
            Self::Leaf(_) => SymbolKind::Leaf,
            Self::Node(_) => SymbolKind::Node,
        }
    }

    /// Returns the symbol tag.
    #[must_use]
    pub fn tag(&self) -> SymbolTag {
        match self {
            Self::Leaf(leaf) => leaf.tag(),
            Self::Node(node) => node.symbol_tag(),
        }
    }

    /// Returns the leaf, if this is one.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&SyntaxTreeLeaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Node(_) => None,
        }
    }

    /// Returns the node, if this is one.
    #[must_use]
    pub fn as_node(&self) -> Option<&SyntaxTreeNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Leaf(_) => None,
        }
    }

    /// Creates a non-owning reference to this symbol.
    #[must_use]
    pub fn downgrade(&self) -> WeakSymbol {
        match self {
            Self::Leaf(leaf) => WeakSymbol(WeakInner::Leaf(Arc::downgrade(&leaf.0))),
            Self::Node(node) => WeakSymbol(WeakInner::Node(Arc::downgrade(&node.0))),
        }
    }

    /// Returns true if both handles refer to the same tree element.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => a.ptr_eq(b),
            (Self::Node(a), Self::Node(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<SyntaxTreeLeaf> for Symbol {
    fn from(leaf: SyntaxTreeLeaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<SyntaxTreeNode> for Symbol {
    fn from(node: SyntaxTreeNode) -> Self {
        Self::Node(node)
    }
}

/// A non-owning reference to a symbol of a tree owned elsewhere.
///
/// Upgrading fails once the tree has been dropped.
#[derive(Debug, Clone)]
pub struct WeakSymbol(WeakInner);

#[derive(Debug, Clone)]
enum WeakInner {
    Leaf(Weak<TokenInfo>),
    Node(Weak<NodeData>),
}

impl WeakSymbol {
    /// Returns the referenced symbol if its tree is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Symbol> {
        match &self.0 {
            WeakInner::Leaf(weak) => weak.upgrade().map(|t| Symbol::Leaf(SyntaxTreeLeaf(t))),
            WeakInner::Node(weak) => weak.upgrade().map(|n| Symbol::Node(SyntaxTreeNode(n))),
        }
    }
}

/// Returns the leftmost leaf under `symbol`, skipping null children.
///
/// Returns `None` for subtrees that contain no leaves at all.
#[must_use]
pub fn leftmost_leaf(symbol: &Symbol) -> Option<&SyntaxTreeLeaf> {
    match symbol {
        Symbol::Leaf(leaf) => Some(leaf),
        Symbol::Node(node) => node.children().iter().flatten().find_map(leftmost_leaf),
    }
}

/// Returns the rightmost leaf under `symbol`, skipping null children.
#[must_use]
pub fn rightmost_leaf(symbol: &Symbol) -> Option<&SyntaxTreeLeaf> {
    match symbol {
        Symbol::Leaf(leaf) => Some(leaf),
        Symbol::Node(node) => node
            .children()
            .iter()
            .rev()
            .flatten()
            .find_map(rightmost_leaf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(left: usize, text: &str) -> Option<Symbol> {
        Some(Symbol::leaf(TokenInfo::new(1, left, text)))
    }

    #[test]
    fn test_leftmost_leaf_skips_null_and_empty_subtrees() {
        let tree = Symbol::node(
            10,
            vec![
                None,
                Some(Symbol::node(11, vec![None])),
                Some(Symbol::node(12, vec![leaf(4, "a"), leaf(6, "b")])),
            ],
        );
        let found = leftmost_leaf(&tree).map(|l| l.token().left());
        assert_eq!(found, Some(4));
        let last = rightmost_leaf(&tree).map(|l| l.token().left());
        assert_eq!(last, Some(6));
    }

    #[test]
    fn test_leafless_subtree() {
        let tree = Symbol::node(1, vec![None, Some(Symbol::node(2, vec![]))]);
        assert!(leftmost_leaf(&tree).is_none());
    }

    #[test]
    fn test_matches_tag() {
        let node = SyntaxTreeNode::new(3, vec![]);
        assert!(node.matches_tag(3));
        assert!(!node.matches_tag(4));
        assert!(node.matches_tag_any_of(&[1, 3]));
        assert!(!node.matches_tag_any_of(&[]));
    }

    #[test]
    fn test_weak_symbol_does_not_keep_tree_alive() {
        let tree = Symbol::node(1, vec![leaf(0, "x")]);
        let weak = tree.downgrade();
        assert!(weak.upgrade().is_some_and(|s| s.ptr_eq(&tree)));
        drop(tree);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_symbol_tag() {
        let tree = Symbol::node(9, vec![leaf(0, "x")]);
        assert_eq!(
            tree.tag(),
            SymbolTag {
                kind: SymbolKind::Node,
                tag: 9
            }
        );
        let first = tree.as_node().and_then(|n| n.child(0)).map(Symbol::tag);
        assert_eq!(
            first,
            Some(SymbolTag {
                kind: SymbolKind::Leaf,
                tag: 1
            })
        );
    }
}
