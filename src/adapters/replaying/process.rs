//! Replaying adapter for the `ProcessRunner` port.

use std::sync::Mutex;

use super::replay_result;
use crate::adapters::failure::ReplayedFailure;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::{SvnError, SvnResult};
use crate::ports::process::{Invocation, ProcessOutput, ProcessRunner};

/// Replays recorded process results from a cassette.
///
/// Recorded failures come back as the variant that was recorded. A bare
/// string under `Err` replays as [`SvnError::Spawn`].
pub struct ReplayingProcessRunner {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingProcessRunner {
    /// Creates a new replaying runner from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ProcessRunner for ReplayingProcessRunner {
    fn run(&self, invocation: &Invocation) -> SvnResult<ProcessOutput> {
        let (input, output) = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            let interaction = replayer.next_interaction("process", "run");
            (interaction.input.clone(), interaction.output.clone())
        };

        let recorded_args = input.get("args").cloned().unwrap_or_default();
        if recorded_args != serde_json::json!(invocation.args) {
            tracing::warn!(
                requested = %invocation.display(),
                recorded = %recorded_args,
                "replayed interaction was recorded for different arguments"
            );
        }

        match replay_result::<ProcessOutput, ReplayedFailure>(&output) {
            Ok(Ok(out)) => Ok(out),
            Ok(Err(failure)) => Err(failure.into_error(&invocation.program)),
            Err(e) => Err(SvnError::Spawn {
                program: invocation.program.clone(),
                source: std::io::Error::other(format!("malformed recorded output: {e}")),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn make_replayer(interactions: Vec<Interaction>) -> CassetteReplayer {
        let cassette = Cassette { name: "test".into(), recorded_at: Utc::now(), interactions };
        CassetteReplayer::new(&cassette)
    }

    #[test]
    fn replaying_process_run() {
        let replayer = make_replayer(vec![Interaction {
            seq: 0,
            port: "process".into(),
            method: "run".into(),
            input: json!({"program": "svn", "args": ["status"], "cwd": "/wc"}),
            output: json!({"Ok": {"exit_code": 0, "stdout": "M  a.txt\n", "stderr": ""}}),
        }]);
        let runner = ReplayingProcessRunner::new(replayer);
        let result = runner.run(&Invocation::new("svn", ["status"], "/wc")).unwrap();
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.stdout, "M  a.txt\n");
    }

    #[test]
    fn replaying_process_run_error() {
        let replayer = make_replayer(vec![Interaction {
            seq: 0,
            port: "process".into(),
            method: "run".into(),
            input: json!({"program": "svn", "args": ["status"], "cwd": "/wc"}),
            output: json!({"Err": {"kind": "tool_not_found", "program": "svn"}}),
        }]);
        let runner = ReplayingProcessRunner::new(replayer);
        let err = runner.run(&Invocation::new("svn", ["status"], "/wc")).unwrap_err();
        assert!(matches!(err, SvnError::ToolNotFound { ref program } if program == "svn"));
        assert_eq!(err.to_string(), "Executable 'svn' not found on PATH");
    }

    #[test]
    fn replaying_timeout_keeps_its_variant() {
        let replayer = make_replayer(vec![Interaction {
            seq: 0,
            port: "process".into(),
            method: "run".into(),
            input: json!({"program": "svn", "args": ["update"], "cwd": "/wc"}),
            output: json!({"Err": {
                "kind": "timed_out",
                "command": "svn update",
                "timeout": {"secs": 2, "nanos": 0}
            }}),
        }]);
        let runner = ReplayingProcessRunner::new(replayer);
        let err = runner.run(&Invocation::new("svn", ["update"], "/wc")).unwrap_err();
        assert_eq!(err.to_string(), "Command 'svn update' timed out after 2s");
    }

    #[test]
    fn replaying_bare_error_message() {
        let replayer = make_replayer(vec![Interaction {
            seq: 0,
            port: "process".into(),
            method: "run".into(),
            input: json!({}),
            output: json!({"Err": "pipe closed"}),
        }]);
        let runner = ReplayingProcessRunner::new(replayer);
        let err = runner.run(&Invocation::new("svn", ["info"], "/wc")).unwrap_err();
        assert!(matches!(err, SvnError::Spawn { .. }));
    }

    #[test]
    fn replaying_malformed_output_is_an_error() {
        let replayer = make_replayer(vec![Interaction {
            seq: 0,
            port: "process".into(),
            method: "run".into(),
            input: json!({}),
            output: json!({"Ok": {"exit_code": "zero"}}),
        }]);
        let runner = ReplayingProcessRunner::new(replayer);
        let err = runner.run(&Invocation::new("svn", ["info"], "/wc")).unwrap_err();
        assert!(err.to_string().contains("malformed recorded output"));
    }
}
