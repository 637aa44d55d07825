//! Domain layer: the generic tree engine
//!
//! This layer is independent of external concerns (no terminal, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod cursor;
pub mod error;
pub mod item;
pub mod render;
pub mod theme;

pub use arena::{Node, NodeId, NodeTree};
pub use builder::{TreeBuilder, TreeSource};
pub use cursor::{CursorController, TreeAction, Transition};
pub use error::{TreeError, TreeResult};
pub use item::{as_items, shared, ItemRef, TreeItem};
pub use render::Renderer;
pub use theme::{Rgb, Role, Theme};
