//! On-disk cassette schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded sequence of port interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable cassette name.
    pub name: String,
    /// When the recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Commit the recording was made from.
    pub commit: String,
    /// Interactions in recording order.
    pub interactions: Vec<Interaction>,
}

/// One call through a port, with its input and `Ok`/`Err` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position in the recording.
    pub seq: u64,
    /// Port name (e.g., `"generative_model"`).
    pub port: String,
    /// Method name (e.g., `"generate_content"`).
    pub method: String,
    /// Serialized request.
    pub input: serde_json::Value,
    /// Serialized result.
    pub output: serde_json::Value,
}
