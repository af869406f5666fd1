//! Implementations of the [`GenerativeModel`](crate::ports::GenerativeModel) port.
//!
//! - `live/`: the Gemini HTTP endpoint
//! - `recording/`: wraps `live/` and writes each call to a cassette
//! - `replaying/`: answers from a cassette without network I/O

pub mod live;
pub mod recording;
pub mod replaying;
