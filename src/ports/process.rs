//! Process runner port for spawning external executables.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SvnResult;

/// A single child-process invocation.
///
/// Arguments are discrete tokens handed straight to the executable; they are
/// never interpreted by a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable name, resolved through `PATH`.
    pub program: String,
    /// Arguments following the executable name.
    pub args: Vec<String>,
    /// Working directory for the child.
    pub cwd: PathBuf,
    /// Deadline after which the child is killed. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Invocation {
    /// Build an invocation with no timeout.
    #[must_use]
    pub fn new<I, S>(program: impl Into<String>, args: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
            timeout: None,
        }
    }

    /// Set the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The full token list: program followed by its arguments.
    #[must_use]
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str)).collect()
    }

    /// Space-joined command line, for log messages only.
    #[must_use]
    pub fn display(&self) -> String {
        self.argv().join(" ")
    }
}

/// The captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessOutput {
    /// Exit code, or `None` if the child was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl ProcessOutput {
    /// True when the child exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs external processes.
///
/// A non-zero exit status is reported through [`ProcessOutput::exit_code`],
/// not as an error. Errors are reserved for failures to spawn, wait on, or
/// time out the child.
pub trait ProcessRunner: Send + Sync {
    /// Run the invocation to completion and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or waited on, or if
    /// it exceeds its timeout.
    fn run(&self, invocation: &Invocation) -> SvnResult<ProcessOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argv_prefixes_program() {
        let inv = Invocation::new("svn", ["log", "--limit", "5"], "/wc");
        assert_eq!(inv.argv(), vec!["svn", "log", "--limit", "5"]);
        assert_eq!(inv.display(), "svn log --limit 5");
        assert_eq!(inv.timeout, None);
    }

    #[test]
    fn success_requires_zero_exit() {
        let ok = ProcessOutput { exit_code: Some(0), ..ProcessOutput::default() };
        let failed = ProcessOutput { exit_code: Some(1), ..ProcessOutput::default() };
        let signalled = ProcessOutput::default();
        assert!(ok.success());
        assert!(!failed.success());
        assert!(!signalled.success());
    }
}
