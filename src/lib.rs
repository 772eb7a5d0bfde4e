//! Core library entry for the `subverted` CLI.
//!
//! The library wraps the `svn` client behind [`svn::Subversion`], a typed
//! executor bound to one working copy, and renders its output in
//! [`display`]. Process spawning goes through the
//! [`ports::ProcessRunner`] trait so that calls can be recorded to, and
//! replayed from, YAML cassettes.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod logging;
pub mod ports;
pub mod svn;

pub use error::{SvnError, SvnResult};
pub use svn::{OpenPolicy, Subversion, SvnOptions};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version are not failures.
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    logging::setup_logger(cli.verbose);
    commands::dispatch(&cli)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["subverted", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_on_missing_working_copy() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let result = run(["subverted", "--repo", missing.to_str().unwrap(), "status"]);
        let err = result.unwrap_err();
        assert!(err.contains("Working copy not found"), "{err}");
    }
}
