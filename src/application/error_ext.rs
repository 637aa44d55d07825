//! Error conversion helpers for terminal and file I/O
//!
//! Provides an extension trait for attaching context to `io::Result`.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add an action description to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// sink.draw(&frame).with_context("draw frame")?;
    /// ```
    fn with_context(self, action: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_context(self, action: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: action.to_string(),
            source: Box::new(e),
        })
    }
}
