//! Infrastructure layer: terminal I/O behind boundary traits
//!
//! This layer implements the I/O boundary traits for the real terminal.

pub mod error;
pub mod terminal;
pub mod traits;

pub use error::{InfraError, InfraResult};
