//! Application layer: key bindings and the interactive session
//!
//! This layer orchestrates the domain engine and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod keymap;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use keymap::{KeyMap, KeySpec};
pub use session::{Flow, Session};
