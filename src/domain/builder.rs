//! Tree builder: turns nested, heterogeneous caller data into a `NodeTree`.

use std::cell::RefCell;
use std::rc::Rc;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::NodeTree;
use crate::domain::cursor::CursorController;
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::item::{as_items, same_item, ItemRef, TreeItem};

/// The two accepted input shapes.
pub enum TreeSource {
    /// Ordered top-level values
    Items(Vec<ItemRef>),
    /// A single value whose children form the top level; the provider itself is not shown
    Provider(ItemRef),
}

impl From<Vec<ItemRef>> for TreeSource {
    fn from(items: Vec<ItemRef>) -> Self {
        TreeSource::Items(items)
    }
}

impl From<ItemRef> for TreeSource {
    fn from(provider: ItemRef) -> Self {
        TreeSource::Provider(provider)
    }
}

impl<T: TreeItem + 'static> From<&[Rc<RefCell<T>>]> for TreeSource {
    fn from(values: &[Rc<RefCell<T>>]) -> Self {
        TreeSource::Items(as_items(values))
    }
}

impl TreeSource {
    fn top_level(&self) -> Vec<ItemRef> {
        match self {
            TreeSource::Items(items) => items.clone(),
            TreeSource::Provider(provider) => provider.borrow().children(),
        }
    }
}

/// Constructs navigable trees from a `TreeSource`.
#[derive(Debug, Default)]
pub struct TreeBuilder;

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the tree and place the cursor on the first top-level node.
    #[instrument(level = "debug", skip(self, source))]
    pub fn build(&self, source: impl Into<TreeSource>) -> TreeResult<(NodeTree, CursorController)> {
        let tree = self.build_tree(source.into())?;
        let cursor = CursorController::new(&tree)?;
        Ok((tree, cursor))
    }

    /// Build the tree without a cursor. Fails on empty input.
    pub fn build_tree(&self, source: TreeSource) -> TreeResult<NodeTree> {
        let top_level = source.top_level();
        if top_level.is_empty() {
            return Err(TreeError::EmptyTree);
        }

        let mut tree = NodeTree::new();
        let root = tree.root();

        // Reverse push so siblings are popped, and therefore indexed, in domain order
        let mut stack: Vec<(ItemRef, Index)> =
            top_level.into_iter().rev().map(|item| (item, root)).collect();

        while let Some((item, parent_idx)) = stack.pop() {
            if self.is_on_path(&tree, parent_idx, &item) {
                let id = tree
                    .id(parent_idx)
                    .map(|parent_id| parent_id.child(tree.children(parent_idx).len()))
                    .unwrap_or_default();
                return Err(TreeError::CycleDetected(id));
            }

            let children = item.borrow().children();
            let Some(current_idx) = tree.insert_child(parent_idx, item) else {
                continue;
            };
            trace!(
                id = %tree.id(current_idx).map(ToString::to_string).unwrap_or_default(),
                children = children.len(),
                "inserted node"
            );

            for child in children.into_iter().rev() {
                stack.push((child, current_idx));
            }
        }

        debug!(nodes = tree.len(), depth = tree.depth(), "tree built");
        Ok(tree)
    }

    /// True if `item` already appears among the ancestors of a new child of `parent_idx`.
    fn is_on_path(&self, tree: &NodeTree, parent_idx: Index, item: &ItemRef) -> bool {
        let mut current = Some(parent_idx);
        while let Some(idx) = current {
            if let Some(value) = tree.get(idx).and_then(|node| node.value()) {
                if same_item(value, item) {
                    return true;
                }
            }
            current = tree.parent(idx);
        }
        false
    }
}
