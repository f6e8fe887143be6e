//! Ancestor context maintained during syntax tree traversal.

use crate::text::SyntaxTreeNode;

/// The chain of ancestors of the symbol currently being visited.
///
/// Ordered from the tree root (bottom) to the immediate parent (top). Only
/// the traversal that owns it pushes and pops; rules receive a shared
/// reference that is valid for the duration of one callback. Rules that
/// need the chain afterwards keep a copy via [`SyntaxTreeContext::to_vec`].
#[derive(Debug, Default)]
pub struct SyntaxTreeContext<'a> {
    stack: Vec<&'a SyntaxTreeNode>,
}

impl<'a> SyntaxTreeContext<'a> {
    /// Creates an empty context.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with `node` pushed on top, popping it afterwards.
    pub(crate) fn with_pushed<R>(
        &mut self,
        node: &'a SyntaxTreeNode,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.push(node);
        let result = f(self);
        self.pop();
        result
    }

    pub(crate) fn push(&mut self, node: &'a SyntaxTreeNode) {
        self.stack.push(node);
    }

    pub(crate) fn pop(&mut self) {
        self.stack.pop();
    }

    /// Returns true when visiting the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Number of ancestors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// The immediate parent.
    #[must_use]
    pub fn top(&self) -> Option<&'a SyntaxTreeNode> {
        self.stack.last().copied()
    }

    /// Iterates ancestors from the root to the immediate parent.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a SyntaxTreeNode> + '_ {
        self.stack.iter().copied()
    }

    /// Copies the ancestor chain, root first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<SyntaxTreeNode> {
        self.stack.iter().map(|&node| node.clone()).collect()
    }

    /// Returns true if any ancestor has tag `tag`.
    #[must_use]
    pub fn is_inside(&self, tag: i32) -> bool {
        self.stack.iter().any(|node| node.matches_tag(tag))
    }

    /// Like [`Self::is_inside`], ignoring the `skip` innermost ancestors.
    #[must_use]
    pub fn is_inside_starting_from(&self, tag: i32, skip: usize) -> bool {
        self.stack
            .iter()
            .rev()
            .skip(skip)
            .any(|node| node.matches_tag(tag))
    }

    /// Searching outward from the parent, returns true if an ancestor tagged
    /// with one of `includes` is found before one tagged with `excludes`.
    #[must_use]
    pub fn is_inside_first(&self, includes: &[i32], excludes: &[i32]) -> bool {
        for node in self.stack.iter().rev() {
            if node.matches_tag_any_of(includes) {
                return true;
            }
            if node.matches_tag_any_of(excludes) {
                return false;
            }
        }
        false
    }

    /// Returns true if the immediate parent has tag `tag`.
    #[must_use]
    pub fn direct_parent_is(&self, tag: i32) -> bool {
        self.top().is_some_and(|node| node.matches_tag(tag))
    }

    /// Returns true if the immediate parent has any of `tags`.
    #[must_use]
    pub fn direct_parent_is_one_of(&self, tags: &[i32]) -> bool {
        self.top().is_some_and(|node| node.matches_tag_any_of(tags))
    }

    /// Returns true if the innermost ancestors match `tags`, parent first.
    ///
    /// An empty `tags` always matches.
    #[must_use]
    pub fn direct_parents_are(&self, tags: &[i32]) -> bool {
        tags.len() <= self.stack.len()
            && tags
                .iter()
                .zip(self.stack.iter().rev())
                .all(|(&tag, node)| node.matches_tag(tag))
    }

    /// Returns the nearest ancestor satisfying `predicate`.
    pub fn nearest_parent_matching(
        &self,
        predicate: impl Fn(&SyntaxTreeNode) -> bool,
    ) -> Option<&'a SyntaxTreeNode> {
        self.stack.iter().rev().copied().find(|node| predicate(node))
    }

    /// Returns the nearest ancestor with tag `tag`.
    #[must_use]
    pub fn nearest_parent_with_tag(&self, tag: i32) -> Option<&'a SyntaxTreeNode> {
        self.nearest_parent_matching(|node| node.matches_tag(tag))
    }
}
