//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::Overrides;
use crate::svn::DEFAULT_LOG_LIMIT;

/// Top-level CLI parser for `subverted`.
#[derive(Debug, Parser)]
#[command(name = "subverted", version, about = "A friendlier face for your Subversion working copy")]
pub struct Cli {
    /// Working copy to operate on [env: SUBVERTED_REPO, default: current directory].
    #[arg(long, short = 'C', global = true, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Subversion client executable [env: SUBVERTED_SVN, default: svn].
    #[arg(long, global = true, value_name = "PROGRAM")]
    pub svn: Option<String>,

    /// Seconds before a running svn command is killed; 0 waits forever
    /// [env: SUBVERTED_TIMEOUT_SECS, default: 300].
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Open directories that have no .svn control directory, with a warning.
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// The command to execute. Defaults to `overview`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Command-line values that override the environment.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            repo: self.repo.clone(),
            program: self.svn.clone(),
            timeout_secs: self.timeout,
            lenient: self.lenient,
        }
    }
}

/// Supported top-level subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Banner, repository info and recent log entries.
    Overview {
        /// Number of log entries to show.
        #[arg(long, default_value_t = DEFAULT_LOG_LIMIT)]
        limit: u32,
    },
    /// Show working copy status.
    Status,
    /// Show recent log entries.
    Log {
        /// Maximum number of entries.
        #[arg(long, short = 'l', default_value_t = DEFAULT_LOG_LIMIT)]
        limit: u32,
    },
    /// Bring the working copy up to date.
    Update,
    /// Put a file or directory under version control.
    Add {
        /// Path to add.
        path: PathBuf,
    },
    /// Commit local changes.
    Commit {
        /// Commit message.
        #[arg(long, short = 'm')]
        message: Option<String>,
    },
    /// Show repository information as a table.
    Info,
    /// List branch names under a repository URL.
    Branches {
        /// URL of the branches directory.
        url: String,
    },
    /// Show local modifications.
    Diff {
        /// Restrict the diff to one path.
        path: Option<PathBuf>,
    },
    /// Show per-line authorship (not yet supported).
    Blame {
        /// File to annotate.
        path: PathBuf,
    },
}

impl Default for Command {
    fn default() -> Self {
        Self::Overview { limit: DEFAULT_LOG_LIMIT }
    }
}
