//! Parent links for a syntax tree.
//!
//! Built by one pre-order walk from the root; `parents[i]` holds the parent of
//! node `i`. The walk assumes the arena is a proper tree (see
//! [`SyntaxTree::check`]) and does not re-validate it.

use crate::ast::{NodeId, SyntaxTree};

/// Immediate-parent lookup for every node reachable from a tree's root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParentIndex {
    parents: Vec<Option<NodeId>>,
}

impl ParentIndex {
    /// Build the index for every node reachable from `tree.root`.
    pub fn build(tree: &SyntaxTree) -> Self {
        Self::build_from(tree, tree.root)
    }

    /// Build the index for the subtree rooted at `root`. Nodes outside that
    /// subtree, and `root` itself, have no entry.
    pub fn build_from(tree: &SyntaxTree, root: NodeId) -> Self {
        let mut parents = vec![None; tree.len()];
        if root.index() >= tree.len() {
            return Self { parents };
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let children = tree[id].children();
            for &child in &children {
                parents[child.index()] = Some(id);
            }
            // Reverse so siblings are visited left to right.
            stack.extend(children.into_iter().rev());
        }
        tracing::trace!(nodes = parents.len(), "built parent index");
        Self { parents }
    }

    /// The immediate parent of `id`, or `None` for the root and for nodes the
    /// walk never reached.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.index()).copied().flatten()
    }

    /// Walk parent links from `id` up to the root, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(id), move |&p| self.get(p))
    }

    /// Number of nodes that have a parent entry.
    pub fn len(&self) -> usize {
        self.parents.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
