//! `subverted overview` command, the default when no command is given.

use crate::display;
use crate::error::SvnResult;
use crate::svn::Subversion;

/// Print the banner, repository info table and recent log entries.
///
/// # Errors
///
/// Returns the first `svn` failure; nothing after it is printed.
pub fn run(svn: &Subversion, limit: u32) -> SvnResult<()> {
    display::display_header(svn);
    display::display_info(svn)?;
    display::display_logs(svn, limit)
}
