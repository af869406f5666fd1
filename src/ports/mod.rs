//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system. Implementations live in `src/adapters/`.

pub mod generative_model;

pub use generative_model::{
    Candidate, ContentRequest, ContentResponse, GenerateFuture, GenerativeModel, InlineImage,
    Part, ResponseModality, SafetyRating,
};
