//! Working copy path validation.

use std::path::{Path, PathBuf};

use crate::error::{SvnError, SvnResult};

/// Name of the Subversion control directory at the root of a working copy.
pub const CONTROL_DIR: &str = ".svn";

/// How to treat a directory that lacks the control directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenPolicy {
    /// Refuse to open it.
    #[default]
    Strict,
    /// Log a warning and open it anyway; `svn` itself will reject it later.
    Lenient,
}

/// Check `path` and resolve it to an absolute path.
///
/// A missing path or a non-directory is always an error. A directory
/// without [`CONTROL_DIR`] is an error under [`OpenPolicy::Strict`] and a
/// warning under [`OpenPolicy::Lenient`].
///
/// # Errors
///
/// Returns [`SvnError::WorkingCopyNotFound`], [`SvnError::NotADirectory`] or
/// [`SvnError::NotAWorkingCopy`].
pub fn resolve(path: &Path, policy: OpenPolicy) -> SvnResult<PathBuf> {
    if !path.exists() {
        return Err(SvnError::WorkingCopyNotFound { path: path.to_path_buf() });
    }
    if !path.is_dir() {
        return Err(SvnError::NotADirectory { path: path.to_path_buf() });
    }

    let absolute = absolute(path);
    if !absolute.join(CONTROL_DIR).is_dir() {
        match policy {
            OpenPolicy::Strict => return Err(SvnError::NotAWorkingCopy { path: absolute }),
            OpenPolicy::Lenient => {
                tracing::warn!(path = %absolute.display(), "Given path is not a valid repo");
            }
        }
    }
    Ok(absolute)
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
