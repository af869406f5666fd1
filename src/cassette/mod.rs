//! YAML cassettes of generative model calls, for offline runs and tests.
//!
//! Set `NAILSTUDIO_REC=1` to record a live session, then point
//! `NAILSTUDIO_REPLAY` at the written file to replay it.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
