//! Storage layer for stepform
//!
//! JSONL persistence for submissions and the audit trail, plus atomic JSON
//! writes for whole documents.

pub mod file_io;
pub mod submissions;

pub use file_io::{append_jsonl, read_jsonl, write_json_atomic};
pub use submissions::SubmissionStore;
