//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::TreeError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] TreeError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid key binding `{spec}`: {reason}")]
    KeyBinding { spec: String, reason: String },

    #[error("invalid hierarchy file {}: {message}", path.display())]
    Hierarchy { path: PathBuf, message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
