// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Decision tree mirroring the recursion of a search.
//!
//! Nodes live in an arena owned by [`DecisionTree`]. Children are listed in
//! evaluation order; the parent link is a plain index and owns nothing. Nodes
//! are created before the engine recurses into a choice, updated in place when
//! that subtree is finished, and never removed.

use serde::Serialize;

/// Index of a node in its [`DecisionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// The root is always the first node of the arena.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// One attempted choice (or the root, which has none).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode<C> {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    choice: Option<C>,
    depth: usize,
    pub(crate) is_solution: bool,
    pub(crate) is_backtracked: bool,
    pub(crate) is_active: bool,
    pub(crate) is_leaf: bool,
    pub(crate) is_dead_end: bool,
    /// Position of this node in the order nodes were created.
    execution_order: usize,
    /// Choices left at the parent when this one was taken, itself included.
    estimated_branching: usize,
    path: Vec<C>,
}

impl<C> TreeNode<C> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn choice(&self) -> Option<&C> {
        self.choice.as_ref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_solution(&self) -> bool {
        self.is_solution
    }

    /// The search returned from this node and went on to a sibling or
    /// further up. Nodes on the path being explored when a run stopped early,
    /// was cancelled or failed are never marked backtracked.
    pub fn is_backtracked(&self) -> bool {
        self.is_backtracked
    }

    /// The node is on the path being explored. Cleared on the way back up,
    /// including when a run stops early or is cancelled. When a callback
    /// fails the path below the root stays active, showing where it failed.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    /// The node had no choices to enumerate.
    pub fn is_dead_end(&self) -> bool {
        self.is_dead_end
    }

    pub fn execution_order(&self) -> usize {
        self.execution_order
    }

    pub fn estimated_branching(&self) -> usize {
        self.estimated_branching
    }

    /// Choices from the root to this node.
    pub fn path(&self) -> &[C] {
        &self.path
    }
}

/// The full tree of one search run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionTree<C> {
    nodes: Vec<TreeNode<C>>,
}

impl<C: Clone> DecisionTree<C> {
    /// Create a tree holding only an active root.
    pub fn new() -> Self {
        Self {
            nodes: vec![TreeNode {
                id: NodeId::ROOT,
                parent: None,
                children: Vec::new(),
                choice: None,
                depth: 0,
                is_solution: false,
                is_backtracked: false,
                is_active: true,
                is_leaf: true,
                is_dead_end: false,
                execution_order: 0,
                estimated_branching: 0,
                path: Vec::new(),
            }],
        }
    }

    /// Attach a new active child under `parent` and return its id.
    pub(crate) fn add_child(
        &mut self,
        parent: NodeId,
        choice: &C,
        path: &[C],
        estimated_branching: usize,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let depth = self.nodes[parent.0].depth + 1;
        self.nodes.push(TreeNode {
            id,
            parent: Some(parent),
            children: Vec::new(),
            choice: Some(choice.clone()),
            depth,
            is_solution: false,
            is_backtracked: false,
            is_active: true,
            is_leaf: true,
            is_dead_end: false,
            execution_order: id.0,
            estimated_branching,
            path: path.to_vec(),
        });
        let parent_node = &mut self.nodes[parent.0];
        parent_node.children.push(id);
        parent_node.is_leaf = false;
        id
    }
}

impl<C: Clone> Default for DecisionTree<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> DecisionTree<C> {
    pub fn root(&self) -> &TreeNode<C> {
        &self.nodes[NodeId::ROOT.0]
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &TreeNode<C> {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode<C>> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TreeNode<C> {
        &mut self.nodes[id.0]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode<C>> {
        self.nodes.iter()
    }

    /// Node ids in pre-order (node, then children left to right).
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    /// Nodes flagged as solutions, in discovery order.
    pub fn solutions(&self) -> impl Iterator<Item = &TreeNode<C>> {
        self.nodes.iter().filter(|node| node.is_solution)
    }

    /// Deepest node depth.
    pub fn height(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_root() {
        let tree: DecisionTree<u8> = DecisionTree::new();
        assert_eq!(tree.len(), 1);
        let root = tree.root();
        assert_eq!(root.id(), NodeId::ROOT);
        assert!(root.parent().is_none());
        assert!(root.is_active());
        assert!(root.is_leaf());
        assert!(root.choice().is_none());
    }

    #[test]
    fn test_add_child_links_both_ways() {
        let mut tree = DecisionTree::new();
        let a = tree.add_child(NodeId::ROOT, &'a', &['a'], 2);
        let b = tree.add_child(NodeId::ROOT, &'b', &['b'], 1);
        let ab = tree.add_child(a, &'b', &['a', 'b'], 1);

        assert_eq!(tree.root().children(), &[a, b]);
        assert!(!tree.root().is_leaf());
        assert_eq!(tree.node(ab).parent(), Some(a));
        assert_eq!(tree.node(ab).depth(), 2);
        assert_eq!(tree.node(ab).path(), &['a', 'b']);
        assert_eq!(tree.node(ab).execution_order(), 3);
        assert_eq!(tree.node(a).estimated_branching(), 2);
        assert!(!tree.node(a).is_leaf());
        assert!(tree.node(b).is_leaf());
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_preorder() {
        let mut tree = DecisionTree::new();
        let a = tree.add_child(NodeId::ROOT, &1, &[1], 2);
        let b = tree.add_child(NodeId::ROOT, &2, &[2], 1);
        let a1 = tree.add_child(a, &3, &[1, 3], 2);
        let a2 = tree.add_child(a, &4, &[1, 4], 1);
        let b1 = tree.add_child(b, &5, &[2, 5], 1);

        assert_eq!(tree.preorder(), vec![NodeId::ROOT, a, a1, a2, b, b1]);
    }
}
