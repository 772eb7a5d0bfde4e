//! Runtime settings assembled from CLI flags, the environment and `.env`.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{SvnError, SvnResult};
use crate::svn::{OpenPolicy, DEFAULT_PROGRAM, DEFAULT_TIMEOUT};

/// Working copy to operate on.
pub const ENV_REPO: &str = "SUBVERTED_REPO";
/// Client executable.
pub const ENV_SVN: &str = "SUBVERTED_SVN";
/// Per-call timeout in seconds; `0` disables it.
pub const ENV_TIMEOUT: &str = "SUBVERTED_TIMEOUT_SECS";
/// Accept directories without a `.svn` control directory.
pub const ENV_LENIENT: &str = "SUBVERTED_LENIENT";
/// Cassette file to record every process call into.
pub const ENV_RECORD: &str = "SUBVERTED_RECORD";

/// Values given on the command line, which take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--repo`
    pub repo: Option<PathBuf>,
    /// `--svn`
    pub program: Option<String>,
    /// `--timeout`
    pub timeout_secs: Option<u64>,
    /// `--lenient`
    pub lenient: bool,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Working copy path.
    pub repo: PathBuf,
    /// Client executable.
    pub program: String,
    /// Per-call timeout.
    pub timeout: Option<Duration>,
    /// Open policy for the working copy.
    pub policy: OpenPolicy,
    /// Cassette destination, when recording.
    pub record: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from the process environment, loading `.env` first
    /// when one exists.
    ///
    /// # Errors
    ///
    /// Returns [`SvnError::Config`] if an environment value cannot be parsed.
    pub fn load(overrides: Overrides) -> SvnResult<Self> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve settings against an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`SvnError::Config`] if a value cannot be parsed.
    pub fn resolve(
        overrides: Overrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> SvnResult<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let repo = overrides.repo.or_else(|| var(ENV_REPO).map(PathBuf::from)).unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        });

        let program = overrides
            .program
            .or_else(|| var(ENV_SVN))
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => Some(secs),
            None => var(ENV_TIMEOUT).map(|raw| parse_secs(&raw)).transpose()?,
        };
        let timeout = match timeout_secs {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(DEFAULT_TIMEOUT),
        };

        let lenient = overrides.lenient || var(ENV_LENIENT).is_some_and(|v| parse_flag(&v));
        let policy = if lenient { OpenPolicy::Lenient } else { OpenPolicy::Strict };

        let record = var(ENV_RECORD).map(PathBuf::from);

        Ok(Self { repo, program, timeout, policy, record })
    }
}

fn parse_secs(raw: &str) -> SvnResult<u64> {
    raw.trim().parse().map_err(|e| SvnError::Config {
        key: ENV_TIMEOUT.to_string(),
        reason: format!("expected a whole number of seconds, got {raw:?} ({e})"),
    })
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
