//! Replaying adapters that serve recorded interactions from cassettes.

pub mod generative_model;

use std::sync::{Arc, Mutex, PoisonError};

use crate::cassette::replayer::CassetteReplayer;

/// Retrieve the next recorded output for a given port and method.
///
/// # Panics
///
/// Panics if the cassette has no more interactions for the pair.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    guard.next_interaction(port, method).output
}

/// Deserialize a replayed output as `Result<T, Error>`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let msg = err_val.as_str().unwrap_or("replayed error").to_string();
        return Err(msg.into());
    }
    let value = match output.get("Ok").or_else(|| output.get("ok")) {
        Some(ok_val) => ok_val.clone(),
        None => output,
    };
    serde_json::from_value(value).map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ContentResponse;
    use serde_json::json;

    #[test]
    fn replays_ok_value() {
        let out = json!({"Ok": {"candidates": [{"parts": [{"text": "hi"}]}]}});
        let response: ContentResponse = replay_result(out).unwrap();
        assert_eq!(response.text(), "hi");
    }

    #[test]
    fn replays_err_value() {
        let err = replay_result::<ContentResponse>(json!({"Err": "API error (500): boom"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "API error (500): boom");
    }

    #[test]
    fn bare_value_is_treated_as_ok() {
        let response: ContentResponse = replay_result(json!({"candidates": []})).unwrap();
        assert!(response.candidates.is_empty());
    }
}
