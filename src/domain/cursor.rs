//! Cursor state machine: maps logical actions to moves or leaf mutation.

use std::fmt;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeId, NodeTree};
use crate::domain::error::{TreeError, TreeResult};

/// Logical actions the cursor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeAction {
    /// Previous sibling
    Up,
    /// Next sibling
    Down,
    /// Ascend to the parent
    Back,
    /// Descend into a group, or mutate a leaf
    Activate,
    /// End the session
    Quit,
}

impl fmt::Display for TreeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TreeAction::Up => "up",
            TreeAction::Down => "down",
            TreeAction::Back => "back",
            TreeAction::Activate => "activate",
            TreeAction::Quit => "quit",
        };
        f.write_str(name)
    }
}

/// Outcome of applying one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Cursor moved to a new node
    Moved(Index),
    /// Leaf under the cursor was mutated in place
    Mutated(Index),
    /// Boundary reached; nothing changed
    Blocked,
    /// Session must end
    Quit,
}

/// Holds the current node. Never points at the synthetic root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorController {
    current: Index,
}

impl CursorController {
    /// Cursor on the first top-level node.
    pub fn new(tree: &NodeTree) -> TreeResult<Self> {
        let first = tree.first_child(tree.root()).ok_or(TreeError::EmptyTree)?;
        Ok(Self { current: first })
    }

    /// Cursor on the node identified by `id`.
    pub fn at(tree: &NodeTree, id: &NodeId) -> TreeResult<Self> {
        let idx = tree
            .find(id)
            .ok_or_else(|| TreeError::UnknownNode(id.clone()))?;
        if tree.is_root(idx) {
            return Err(TreeError::RootNotSelectable);
        }
        Ok(Self { current: idx })
    }

    pub fn current(&self) -> Index {
        self.current
    }

    pub fn id<'t>(&self, tree: &'t NodeTree) -> Option<&'t NodeId> {
        tree.id(self.current)
    }

    #[instrument(level = "debug", skip(self, tree))]
    pub fn apply(&mut self, tree: &NodeTree, action: TreeAction) -> Transition {
        let transition = match action {
            TreeAction::Up => self.move_to(tree.previous_sibling(self.current)),
            TreeAction::Down => self.move_to(tree.next_sibling(self.current)),
            TreeAction::Back => self.ascend(tree),
            TreeAction::Activate => self.activate(tree),
            TreeAction::Quit => Transition::Quit,
        };
        trace!(?transition, cursor = %self.id(tree).map(ToString::to_string).unwrap_or_default());
        transition
    }

    fn move_to(&mut self, target: Option<Index>) -> Transition {
        match target {
            Some(idx) => {
                self.current = idx;
                Transition::Moved(idx)
            }
            None => Transition::Blocked,
        }
    }

    fn ascend(&mut self, tree: &NodeTree) -> Transition {
        if tree.is_top_level(self.current) {
            return Transition::Blocked;
        }
        self.move_to(tree.parent(self.current))
    }

    fn activate(&mut self, tree: &NodeTree) -> Transition {
        if !tree.is_leaf(self.current) {
            return self.move_to(tree.first_child(self.current));
        }
        match tree.get(self.current).and_then(|node| node.value()) {
            Some(value) => {
                value.borrow_mut().mutate();
                debug!(leaf = %value.borrow().display_name(), "leaf mutated");
                Transition::Mutated(self.current)
            }
            None => Transition::Blocked,
        }
    }
}
