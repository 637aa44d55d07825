//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::TreeError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(InfraError::Io { .. }) => crate::exitcode::IOERR,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::Config { .. } | ApplicationError::KeyBinding { .. } => {
                    crate::exitcode::CONFIG
                }
                ApplicationError::Hierarchy { .. } => crate::exitcode::DATAERR,
                ApplicationError::Domain(TreeError::EmptyTree) => crate::exitcode::DATAERR,
                ApplicationError::Domain(_) => crate::exitcode::SOFTWARE,
                ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CliError::Usage("no command".into()), crate::exitcode::USAGE)]
    #[case(
        ApplicationError::Config { message: "bad".into() }.into(),
        crate::exitcode::CONFIG
    )]
    #[case(
        ApplicationError::KeyBinding { spec: "x".into(), reason: "dup".into() }.into(),
        crate::exitcode::CONFIG
    )]
    #[case(ApplicationError::Domain(TreeError::EmptyTree).into(), crate::exitcode::DATAERR)]
    #[case(
        InfraError::io("enter raw mode", std::io::Error::other("tty")).into(),
        crate::exitcode::IOERR
    )]
    fn test_exit_code(#[case] error: CliError, #[case] expected: i32) {
        assert_eq!(error.exit_code(), expected);
    }
}
