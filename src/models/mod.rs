//! Core data models for stepform
//!
//! Field values and identifiers shared by the engine, sinks and storage.

pub mod ids;
pub mod value;

pub use ids::{SessionId, SubmissionId};
pub use value::{FieldMap, FieldValue, FileAttachment};
