//! Replaying adapters that replay recorded interactions.

pub mod process;

pub use process::ReplayingProcessRunner;

use serde::de::DeserializeOwned;

/// Decode a recorded `{"Ok": v}` / `{"Err": e}` output.
///
/// Mirror of `recording::record_result`. A bare value with neither key is
/// treated as `Ok`, so hand-written cassettes can stay terse.
pub(crate) fn replay_result<T: DeserializeOwned, E: DeserializeOwned>(
    output: &serde_json::Value,
) -> Result<Result<T, E>, serde_json::Error> {
    if let Some(err) = output.get("Err") {
        return serde_json::from_value(err.clone()).map(Err);
    }
    let value = output.get("Ok").unwrap_or(output);
    serde_json::from_value(value.clone()).map(Ok)
}
