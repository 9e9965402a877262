//! Audit logging for stepform
//!
//! Records session events (started, step advanced or blocked, submission
//! completed or failed) in an append-only JSONL log. Only field names are
//! recorded, never values.
//!
//! # Example
//!
//! ```rust,ignore
//! use stepform::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.record(AuditEntry::started(&session));
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Event};
pub use logger::AuditLogger;
