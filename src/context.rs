//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::LiveProcessRunner;
use crate::adapters::recording::RecordingProcessRunner;
use crate::adapters::replaying::ReplayingProcessRunner;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::SvnResult;
use crate::ports::process::ProcessRunner;

/// Bundles the port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live, replaying,
/// recording).
pub struct ServiceContext {
    /// Runner used to spawn the `svn` client.
    pub runner: Arc<dyn ProcessRunner>,
    /// Optional cassette recorder; written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context that spawns real processes.
    #[must_use]
    pub fn live() -> Self {
        Self { runner: Arc::new(LiveProcessRunner), recorder: None }
    }

    /// Creates a recording context that writes a cassette file on drop.
    ///
    /// Uses the live runner for actual work. This is the developer-only
    /// mechanism for capturing cassettes via the `SUBVERTED_RECORD` env var.
    #[must_use]
    pub fn recording(path: &Path) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "subverted-session")));
        let runner = RecordingProcessRunner::new(Box::new(LiveProcessRunner), Arc::clone(&recorder));
        Self { runner: Arc::new(runner), recorder: Some(recorder) }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> SvnResult<Self> {
        let replayer = CassetteReplayer::load(path)?;
        Ok(Self { runner: Arc::new(ReplayingProcessRunner::new(replayer)), recorder: None })
    }

    /// Creates a context around an arbitrary runner.
    #[must_use]
    pub fn with_runner(runner: impl ProcessRunner + 'static) -> Self {
        Self { runner: Arc::new(runner), recorder: None }
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else { return };
        let guard = match recorder.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match guard.write() {
            Ok(()) => tracing::info!(path = %guard.path().display(), "cassette written"),
            Err(e) => tracing::warn!("failed to write cassette: {e}"),
        }
    }
}
