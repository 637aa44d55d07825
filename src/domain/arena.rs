use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use itertools::Itertools;
use tracing::instrument;

use crate::domain::item::ItemRef;

/// Path of sibling indices from the root down to a node.
///
/// Displayed as the concatenation of the decimal indices, so the root's
/// first child is `0` and that child's second child is `01`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Vec<usize>);

impl NodeId {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_indices(indices: impl Into<Vec<usize>>) -> Self {
        Self(indices.into())
    }

    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Index among siblings, None for the root.
    pub fn position(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.0
            .split_last()
            .map(|(_, ancestors)| NodeId(ancestors.to_vec()))
    }

    /// True if `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &NodeId) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(""))
    }
}

/// Tree node in the arena-based hierarchy structure.
pub struct Node {
    id: NodeId,
    /// Caller's value, None only for the synthetic root
    value: Option<ItemRef>,
    /// Index of parent node in the arena, None for the root
    parent: Option<Index>,
    /// Indices of child nodes in the arena, in domain order
    children: Vec<Index>,
}

impl Node {
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn value(&self) -> Option<&ItemRef> {
        self.value.as_ref()
    }

    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    pub fn children(&self) -> &[Index] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Zero children, whatever the wrapped value is.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn display_name(&self) -> String {
        self.value
            .as_ref()
            .map(|value| value.borrow().display_name())
            .unwrap_or_default()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id.to_string())
            .field("name", &self.display_name())
            .field("parent", &self.parent)
            .field("children", &self.children)
            .finish()
    }
}

/// Arena-based tree with a synthetic, valueless root.
///
/// Shape is fixed once built: nodes are only appended, never removed.
#[derive(Debug)]
pub struct NodeTree {
    /// Arena storage for all tree nodes
    arena: Arena<Node>,
    /// Index of the synthetic root
    root: Index,
    /// Path id lookup
    ids: HashMap<NodeId, Index>,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node {
            id: NodeId::root(),
            value: None,
            parent: None,
            children: Vec::new(),
        });
        let ids = HashMap::from([(NodeId::root(), root)]);
        Self { arena, root, ids }
    }

    /// Append `value` as the last child of `parent`; the id is derived from
    /// the parent's id and the new sibling index.
    #[instrument(level = "trace", skip(self, value))]
    pub(crate) fn insert_child(&mut self, parent: Index, value: ItemRef) -> Option<Index> {
        let parent_node = self.arena.get(parent)?;
        let id = parent_node.id.child(parent_node.children.len());
        let node_idx = self.arena.insert(Node {
            id: id.clone(),
            value: Some(value),
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(node_idx);
        }
        self.ids.insert(id, node_idx);
        Some(node_idx)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn get(&self, idx: Index) -> Option<&Node> {
        self.arena.get(idx)
    }

    /// Resolve a path id to its node.
    pub fn find(&self, id: &NodeId) -> Option<Index> {
        self.ids.get(id).copied()
    }

    /// Number of nodes, not counting the synthetic root.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn id(&self, idx: Index) -> Option<&NodeId> {
        self.get(idx).map(Node::id)
    }

    pub fn parent(&self, idx: Index) -> Option<Index> {
        self.get(idx)?.parent
    }

    pub fn children(&self, idx: Index) -> &[Index] {
        self.get(idx).map(Node::children).unwrap_or(&[])
    }

    pub fn first_child(&self, idx: Index) -> Option<Index> {
        self.children(idx).first().copied()
    }

    pub fn is_root(&self, idx: Index) -> bool {
        idx == self.root
    }

    pub fn is_leaf(&self, idx: Index) -> bool {
        self.children(idx).is_empty()
    }

    /// Direct child of the root.
    pub fn is_top_level(&self, idx: Index) -> bool {
        self.parent(idx) == Some(self.root)
    }

    /// Sibling `offset` positions away from `idx`; None past either end.
    fn sibling(&self, idx: Index, offset: isize) -> Option<Index> {
        let position = self.get(idx)?.id.position()?;
        let target = position.checked_add_signed(offset)?;
        self.children(self.parent(idx)?).get(target).copied()
    }

    pub fn next_sibling(&self, idx: Index) -> Option<Index> {
        self.sibling(idx, 1)
    }

    pub fn previous_sibling(&self, idx: Index) -> Option<Index> {
        self.sibling(idx, -1)
    }

    /// Top-level ancestor of `idx` (itself when already top-level).
    pub fn branch(&self, idx: Index) -> Option<Index> {
        let mut current = idx;
        loop {
            let parent = self.parent(current)?;
            if parent == self.root {
                return Some(current);
            }
            current = parent;
        }
    }

    pub fn display_name(&self, idx: Index) -> String {
        self.get(idx).map(Node::display_name).unwrap_or_default()
    }

    /// Pre-order traversal, root first.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Number of levels below the synthetic root.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root) - 1
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        1 + self
            .children(node_idx)
            .iter()
            .map(|&child| self.calculate_depth(child))
            .max()
            .unwrap_or(0)
    }

    /// All leaf nodes in pre-order. Empty trees return an empty vector.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self) -> Vec<Index> {
        self.iter()
            .filter(|(idx, node)| !self.is_root(*idx) && node.is_leaf())
            .map(|(idx, _)| idx)
            .collect()
    }
}

pub struct TreeIterator<'a> {
    tree: &'a NodeTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a NodeTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
