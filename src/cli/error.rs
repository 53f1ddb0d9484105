//! CLI-level errors (wraps tree errors)

use thiserror::Error;

use crate::errors::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Io { .. } => crate::exitcode::IOERR,
            CliError::Tree(e) => match e {
                TreeError::FileNotFound(_) => crate::exitcode::NOINPUT,
                TreeError::FileReadError(_) => crate::exitcode::IOERR,
                TreeError::Syntax { .. }
                | TreeError::Parse { .. }
                | TreeError::CycleDetected(_)
                | TreeError::DepthLimitExceeded { .. }
                | TreeError::TooManyNodes { .. } => crate::exitcode::DATAERR,
                TreeError::Config { .. } | TreeError::InvalidStrategy(_) => {
                    crate::exitcode::CONFIG
                }
                TreeError::NodeNotFound | TreeError::SlotOccupied { .. } => {
                    crate::exitcode::SOFTWARE
                }
            },
        }
    }
}
