//! Cassette form of a failed process run.
//!
//! Only the variants a `ProcessRunner` produces get their own tag, so a
//! replayed failure comes back as the same variant with the same message.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SvnError;

/// A runner error as stored under the `Err` key of a cassette entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum RecordedFailure {
    ToolNotFound { program: String },
    PermissionDenied { program: String },
    TimedOut { command: String, timeout: Duration },
    Spawn { program: String, message: String },
}

impl RecordedFailure {
    pub(crate) fn capture(err: &SvnError, program: &str) -> Self {
        match err {
            SvnError::ToolNotFound { program } => Self::ToolNotFound { program: program.clone() },
            SvnError::PermissionDenied { program } => {
                Self::PermissionDenied { program: program.clone() }
            }
            SvnError::TimedOut { command, timeout } => {
                Self::TimedOut { command: command.clone(), timeout: *timeout }
            }
            SvnError::Spawn { program, source } => {
                Self::Spawn { program: program.clone(), message: source.to_string() }
            }
            other => Self::Spawn { program: program.to_string(), message: other.to_string() },
        }
    }

    pub(crate) fn into_error(self) -> SvnError {
        match self {
            Self::ToolNotFound { program } => SvnError::ToolNotFound { program },
            Self::PermissionDenied { program } => SvnError::PermissionDenied { program },
            Self::TimedOut { command, timeout } => SvnError::TimedOut { command, timeout },
            Self::Spawn { program, message } => {
                SvnError::Spawn { program, source: std::io::Error::other(message) }
            }
        }
    }
}

/// What a cassette may hold under `Err`: a tagged failure, or a bare message
/// in hand-written cassettes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ReplayedFailure {
    Tagged(RecordedFailure),
    Message(String),
}

impl ReplayedFailure {
    pub(crate) fn into_error(self, program: &str) -> SvnError {
        match self {
            Self::Tagged(failure) => failure.into_error(),
            Self::Message(message) => SvnError::Spawn {
                program: program.to_string(),
                source: std::io::Error::other(message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn runner_errors_survive_a_cassette() {
        let errors = [
            SvnError::ToolNotFound { program: "svn".into() },
            SvnError::PermissionDenied { program: "svn".into() },
            SvnError::TimedOut { command: "svn update".into(), timeout: Duration::from_secs(300) },
            SvnError::Spawn { program: "svn".into(), source: std::io::Error::other("broken pipe") },
        ];
        for err in errors {
            let stored = serde_json::to_value(RecordedFailure::capture(&err, "svn")).unwrap();
            let restored: ReplayedFailure = serde_json::from_value(stored).unwrap();
            let restored = restored.into_error("svn");
            assert_eq!(restored.to_string(), err.to_string());
            assert_eq!(std::mem::discriminant(&restored), std::mem::discriminant(&err));
        }
    }

    #[test]
    fn tag_is_written_next_to_the_fields() {
        let err = SvnError::ToolNotFound { program: "svn".into() };
        let failure = RecordedFailure::capture(&err, "svn");
        assert_eq!(
            serde_json::to_value(failure).unwrap(),
            json!({"kind": "tool_not_found", "program": "svn"})
        );
    }

    #[test]
    fn bare_message_replays_as_spawn_failure() {
        let failure: ReplayedFailure = serde_json::from_value(json!("pipe closed")).unwrap();
        let err = failure.into_error("svn");
        assert!(matches!(err, SvnError::Spawn { .. }));
        assert_eq!(err.to_string(), "Failed to run 'svn': pipe closed");
    }
}
