//! Error types for working copy access and `svn` invocations.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type for Subversion operations.
pub type SvnResult<T> = Result<T, SvnError>;

/// Everything that can go wrong between opening a working copy and reading
/// the output of an `svn` subcommand.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SvnError {
    /// The working copy path does not exist.
    #[error("Working copy not found: {}", path.display())]
    WorkingCopyNotFound {
        /// Path as given by the caller.
        path: PathBuf,
    },

    /// The working copy path exists but is not a directory.
    #[error("Working copy path is not a directory: {}", path.display())]
    NotADirectory {
        /// Path as given by the caller.
        path: PathBuf,
    },

    /// The directory has no `.svn` control directory.
    #[error("Given path is not a valid repo: {}", path.display())]
    NotAWorkingCopy {
        /// Directory that lacks the control directory.
        path: PathBuf,
    },

    /// The external executable could not be located.
    #[error("Executable '{program}' not found on PATH")]
    ToolNotFound {
        /// Executable name that failed to resolve.
        program: String,
    },

    /// The external executable could not be started due to permissions.
    #[error("Permission denied while running '{program}'")]
    PermissionDenied {
        /// Executable that could not be started.
        program: String,
    },

    /// Spawning or waiting on the child process failed.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Executable being run.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The child process exited with a non-zero status.
    #[error("Subversion command failed: {stderr}")]
    CommandFailed {
        /// Exit code, or `None` if the child was killed by a signal.
        exit_code: Option<i32>,
        /// Trimmed standard error.
        stderr: String,
        /// Whatever the child printed to stdout before failing.
        stdout: String,
    },

    /// The child process outlived its deadline and was killed.
    #[error("Command '{command}' timed out after {}s", timeout.as_secs_f64())]
    TimedOut {
        /// Command line, for messages only.
        command: String,
        /// Deadline that was exceeded.
        timeout: Duration,
    },

    /// An argument was rejected before any process was spawned.
    #[error("{reason}")]
    Validation {
        /// Message shown to the user.
        reason: String,
    },

    /// The operation exists in the API but is not supported yet.
    #[error("'{operation}' is not yet supported")]
    NotImplemented {
        /// Name of the operation.
        operation: String,
    },

    /// A configuration value could not be parsed.
    #[error("Invalid value for {key}: {reason}")]
    Config {
        /// Setting name, usually an environment variable.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A cassette could not be read, parsed or written.
    #[error("Cassette error at {}: {reason}", path.display())]
    Cassette {
        /// Cassette file.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
}

impl SvnError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation { reason: reason.into() }
    }

    /// Map a spawn-time I/O error onto the matching variant.
    #[must_use]
    pub fn from_spawn(program: &str, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::ToolNotFound { program: program.to_string() },
            std::io::ErrorKind::PermissionDenied => {
                Self::PermissionDenied { program: program.to_string() }
            }
            _ => Self::Spawn { program: program.to_string(), source },
        }
    }

    /// The bare message, without the variant prefix.
    ///
    /// For [`SvnError::CommandFailed`] this is the trimmed stderr of the child.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::CommandFailed { stderr, .. } => stderr.clone(),
            other => other.to_string(),
        }
    }

    /// Exit code of the failed child process, if there was one.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }

    /// True when the error was raised before a process was spawned because an
    /// argument was invalid.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
