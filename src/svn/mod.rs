//! Command executor for a single Subversion working copy.
//!
//! [`Subversion`] is the one chokepoint through which the `svn` client is
//! invoked. Each typed operation validates its own arguments, builds a token
//! list and hands it to [`Subversion::run`], which spawns the client inside
//! the working copy and normalizes the outcome.

pub mod working_copy;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, Span};

use crate::error::{SvnError, SvnResult};
use crate::ports::process::{Invocation, ProcessRunner};

pub use working_copy::{OpenPolicy, CONTROL_DIR};

/// Name of the external client executable.
pub const DEFAULT_PROGRAM: &str = "svn";

/// Number of entries `log` fetches when no limit is given.
pub const DEFAULT_LOG_LIMIT: u32 = 10;

/// Default deadline for a single `svn` call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Every character that ends a line of client output. `\r\n` is folded
/// into `\n` before splitting.
const LINE_BREAKS: [char; 10] =
    ['\n', '\r', '\u{b}', '\u{c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}'];

/// Construction options for [`Subversion`].
#[derive(Debug, Clone)]
pub struct SvnOptions {
    /// Executable to run.
    pub program: String,
    /// Per-call deadline. `None` blocks until the child exits.
    pub timeout: Option<Duration>,
    /// Treatment of directories without a control directory.
    pub policy: OpenPolicy,
    /// Span that every call is logged under.
    pub span: Span,
}

impl Default for SvnOptions {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            policy: OpenPolicy::default(),
            span: Span::none(),
        }
    }
}

/// A handle bound to one working copy.
///
/// The working copy path is fixed at construction. Instances bound to
/// different paths share nothing.
pub struct Subversion {
    path: PathBuf,
    program: String,
    timeout: Option<Duration>,
    runner: Arc<dyn ProcessRunner>,
    span: Span,
}

impl std::fmt::Debug for Subversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subversion")
            .field("path", &self.path)
            .field("program", &self.program)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Subversion {
    /// Bind to the working copy at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist or is not a directory, or if
    /// it has no `.svn` directory and the policy is [`OpenPolicy::Strict`].
    pub fn open(
        path: impl AsRef<Path>,
        runner: Arc<dyn ProcessRunner>,
        options: SvnOptions,
    ) -> SvnResult<Self> {
        let path = {
            let _entered = options.span.enter();
            working_copy::resolve(path.as_ref(), options.policy)?
        };
        Ok(Self {
            path,
            program: options.program,
            timeout: options.timeout,
            runner,
            span: options.span,
        })
    }

    /// Absolute path of the bound working copy.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `svn <args>` in the working copy and return its trimmed stdout.
    ///
    /// # Errors
    ///
    /// Returns [`SvnError::CommandFailed`] carrying the trimmed stderr and the
    /// exit code when the client exits non-zero, or a spawn/timeout error.
    pub fn run<I, S>(&self, args: I) -> SvnResult<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let _entered = self.span.enter();
        let invocation = Invocation::new(self.program.as_str(), args, self.path.as_path())
            .with_timeout(self.timeout);
        debug!(command = %invocation.display(), cwd = %self.path.display(), "running command");

        let output = self.runner.run(&invocation)?;
        debug!(exit_code = ?output.exit_code, stdout_len = output.stdout.len(), "command finished");

        if output.success() {
            Ok(output.stdout.trim().to_string())
        } else {
            Err(SvnError::CommandFailed {
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
                stdout: output.stdout,
            })
        }
    }

    /// `svn status`
    ///
    /// # Errors
    ///
    /// Propagates [`Subversion::run`] failures.
    pub fn status(&self) -> SvnResult<String> {
        self.run(["status"])
    }

    /// `svn log --limit <limit>`
    ///
    /// # Errors
    ///
    /// Propagates [`Subversion::run`] failures.
    pub fn log(&self, limit: u32) -> SvnResult<String> {
        self.run(["log".to_string(), "--limit".to_string(), limit.to_string()])
    }

    /// `svn update`
    ///
    /// # Errors
    ///
    /// Propagates [`Subversion::run`] failures.
    pub fn update(&self) -> SvnResult<String> {
        self.run(["update"])
    }

    /// Put a file or directory under version control.
    ///
    /// Relative paths are checked against the working copy root, which is
    /// also where `svn` resolves them.
    ///
    /// # Errors
    ///
    /// Returns [`SvnError::Validation`] without spawning anything if the
    /// target does not exist or its path is not valid UTF-8.
    pub fn add(&self, target: impl AsRef<Path>) -> SvnResult<String> {
        let target = target.as_ref();
        let arg = path_arg(target)?;
        if !self.path.join(target).exists() {
            return Err(SvnError::validation(format!(
                "File or directory does not exist: {}",
                target.display()
            )));
        }
        self.run(["add", arg])
    }

    /// Commit pending changes with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`SvnError::Validation`] without spawning anything if the
    /// message is missing or blank.
    pub fn commit(&self, message: Option<&str>) -> SvnResult<String> {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| SvnError::validation("Must include a message with your commit."))?;
        self.run(["commit", "-m", message])
    }

    /// `svn info`
    ///
    /// # Errors
    ///
    /// Propagates [`Subversion::run`] failures.
    pub fn info(&self) -> SvnResult<String> {
        self.run(["info"])
    }

    /// List the entries under `url`, one branch name per line of output.
    ///
    /// # Errors
    ///
    /// Propagates [`Subversion::run`] failures.
    pub fn list_branches(&self, url: &str) -> SvnResult<Vec<String>> {
        let output = self.run(["list", url])?;
        Ok(split_lines(&output))
    }

    /// Show local changes, optionally restricted to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`SvnError::Validation`] if `target` is not valid UTF-8, and
    /// propagates [`Subversion::run`] failures.
    pub fn diff(&self, target: Option<&Path>) -> SvnResult<String> {
        let mut args = vec!["diff"];
        if let Some(target) = target {
            args.push(path_arg(target)?);
        }
        self.run(args)
    }

    /// Per-line authorship. Not supported yet.
    ///
    /// # Errors
    ///
    /// Always returns [`SvnError::NotImplemented`].
    pub fn blame(&self, _target: &Path) -> SvnResult<String> {
        Err(SvnError::NotImplemented { operation: "blame".to_string() })
    }
}

/// Paths travel as strings through the runner and into cassettes, so one
/// that is not UTF-8 cannot be forwarded faithfully.
fn path_arg(target: &Path) -> SvnResult<&str> {
    target.to_str().ok_or_else(|| {
        SvnError::validation(format!("Path is not valid UTF-8: {}", target.display()))
    })
}

fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let text = text.replace("\r\n", "\n");
    let mut lines: Vec<String> = text.split(&LINE_BREAKS[..]).map(String::from).collect();
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}
