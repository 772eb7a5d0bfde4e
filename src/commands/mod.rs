//! Command dispatch and handlers.

pub mod overview;

use std::sync::Arc;

use tracing::info_span;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::display;
use crate::error::SvnResult;
use crate::svn::{Subversion, SvnOptions};

/// Dispatch a parsed command line to its handler.
///
/// When `SUBVERTED_RECORD` is set to a file path, every `svn` invocation is
/// recorded to a cassette at that path.
///
/// # Errors
///
/// Returns an error string if configuration, opening the working copy, or
/// the selected command fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let settings = Settings::load(cli.overrides()).map_err(|e| e.to_string())?;
    let ctx = match &settings.record {
        Some(path) => ServiceContext::recording(path),
        None => ServiceContext::live(),
    };
    let command = cli.command.clone().unwrap_or_default();
    // The cassette, if any, is written when ctx drops, including on error.
    dispatch_with_context(&command, &settings, &ctx).map_err(|e| e.to_string())
}

/// Dispatch a command with the given settings and service context.
///
/// # Errors
///
/// Returns the first error raised while opening the working copy or running
/// the command.
pub fn dispatch_with_context(
    command: &Command,
    settings: &Settings,
    ctx: &ServiceContext,
) -> SvnResult<()> {
    let svn = open(settings, ctx)?;
    match command {
        Command::Overview { limit } => overview::run(&svn, *limit),
        Command::Status => display::display_status(&svn),
        Command::Log { limit } => {
            display::display_output(&svn.log(*limit)?);
            Ok(())
        }
        Command::Update => {
            display::display_output(&svn.update()?);
            Ok(())
        }
        Command::Add { path } => {
            display::display_output(&svn.add(path)?);
            Ok(())
        }
        Command::Commit { message } => {
            display::display_output(&svn.commit(message.as_deref())?);
            Ok(())
        }
        Command::Info => display::display_info(&svn),
        Command::Branches { url } => {
            let branches = svn.list_branches(url)?;
            display::display_branches(url, &branches);
            Ok(())
        }
        Command::Diff { path } => {
            display::display_output(&svn.diff(path.as_deref())?);
            Ok(())
        }
        Command::Blame { path } => svn.blame(path).map(|out| display::display_output(&out)),
    }
}

fn open(settings: &Settings, ctx: &ServiceContext) -> SvnResult<Subversion> {
    let options = SvnOptions {
        program: settings.program.clone(),
        timeout: settings.timeout,
        policy: settings.policy,
        span: info_span!("svn", repo = %settings.repo.display()),
    };
    Subversion::open(&settings.repo, Arc::clone(&ctx.runner), options)
}
