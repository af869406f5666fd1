//! Nail-art content studio.
//!
//! A [`Session`] turns a prompt and/or reference photo into a master image,
//! lets the user refine it with edits, then produces pose variations and a
//! social media caption. All model calls go through [`AiGateway`], which
//! talks to a [`GenerativeModel`] port with live, recording and replaying
//! adapters.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod codec;
pub mod config;
pub mod context;
pub mod credential;
pub mod error;
pub mod gateway;
pub mod model;
pub mod output;
pub mod params;
pub mod ports;
pub mod prompts;
pub mod session;
pub mod styles;

#[cfg(test)]
mod testing;

pub use credential::Credential;
pub use error::StudioError;
pub use gateway::AiGateway;
pub use ports::GenerativeModel;
pub use session::{AbortHandle, GeneratedImage, Session, SessionPhase};
