//! Interactive session: tree, cursor, renderer and key map driven by an event loop.

use crossterm::event::KeyEvent;
use tracing::{debug, info, instrument, trace};

use crate::application::{ApplicationResult, IoResultExt, KeyMap};
use crate::domain::{
    CursorController, NodeId, NodeTree, Renderer, Transition, TreeAction, TreeBuilder, TreeSource,
};
use crate::infrastructure::traits::{EventSource, FrameSink};

/// Whether the event loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything needed for one interactive selection.
///
/// The tree shape is fixed at construction; only leaf values change, in the
/// caller's own handles.
#[derive(Debug)]
pub struct Session {
    tree: NodeTree,
    cursor: CursorController,
    renderer: Renderer,
    keymap: KeyMap,
}

impl Session {
    /// Build the tree from `source`. Fails on empty input.
    #[instrument(level = "debug", skip_all)]
    pub fn new(
        source: impl Into<TreeSource>,
        renderer: Renderer,
        keymap: KeyMap,
    ) -> ApplicationResult<Self> {
        let (tree, cursor) = TreeBuilder::new().build(source)?;
        let renderer = renderer.with_quit_keys(keymap.quit_keys());
        Ok(Self {
            tree,
            cursor,
            renderer,
            keymap,
        })
    }

    /// Move the cursor to `id` before the session starts.
    pub fn with_cursor(mut self, id: &NodeId) -> ApplicationResult<Self> {
        self.cursor = CursorController::at(&self.tree, id)?;
        Ok(self)
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    pub fn cursor_id(&self) -> NodeId {
        self.cursor.id(&self.tree).cloned().unwrap_or_default()
    }

    /// Display name of the node under the cursor.
    pub fn current_name(&self) -> String {
        self.tree.display_name(self.cursor.current())
    }

    pub fn frame(&self) -> String {
        self.renderer.render(&self.tree, self.cursor.current())
    }

    /// Apply one logical action.
    pub fn apply(&mut self, action: TreeAction) -> Transition {
        self.cursor.apply(&self.tree, action)
    }

    /// Handle one key event; unbound keys are ignored.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Flow {
        let Some(action) = self.keymap.resolve(event) else {
            trace!(?event, "ignored key");
            return Flow::Continue;
        };
        match self.apply(action) {
            Transition::Quit => Flow::Quit,
            transition => {
                debug!(%action, ?transition, cursor = %self.cursor_id(), "key handled");
                Flow::Continue
            }
        }
    }

    /// Draw, then redraw after every event until quit or end of input.
    #[instrument(level = "debug", skip_all)]
    pub fn run<E, F>(&mut self, events: &mut E, sink: &mut F) -> ApplicationResult<()>
    where
        E: EventSource,
        F: FrameSink,
    {
        sink.draw(&self.frame()).with_context("draw frame")?;
        while let Some(event) = events.next_key().with_context("read key event")? {
            if self.handle_key(&event) == Flow::Quit {
                info!(cursor = %self.cursor_id(), "session ended by quit");
                return Ok(());
            }
            sink.draw(&self.frame()).with_context("draw frame")?;
        }
        info!(cursor = %self.cursor_id(), "session ended: input exhausted");
        Ok(())
    }
}
