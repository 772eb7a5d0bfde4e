//! Recording adapter for the `ProcessRunner` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::adapters::failure::RecordedFailure;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::SvnResult;
use crate::ports::process::{Invocation, ProcessOutput, ProcessRunner};

/// Records process interactions while delegating to an inner implementation.
pub struct RecordingProcessRunner {
    inner: Box<dyn ProcessRunner>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingProcessRunner {
    /// Creates a new recording runner wrapping the given implementation.
    #[must_use]
    pub fn new(inner: Box<dyn ProcessRunner>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct RunInput<'a> {
    program: &'a str,
    args: &'a [String],
    cwd: String,
}

impl ProcessRunner for RecordingProcessRunner {
    fn run(&self, invocation: &Invocation) -> SvnResult<ProcessOutput> {
        let result = self.inner.run(invocation);
        let input = RunInput {
            program: &invocation.program,
            args: &invocation.args,
            cwd: invocation.cwd.display().to_string(),
        };
        let recorded =
            result.as_ref().map_err(|e| RecordedFailure::capture(e, &invocation.program));
        record_result(&self.recorder, "process", "run", &input, &recorded);
        result
    }
}
