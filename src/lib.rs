//! stepform - multi-step registration form engine
//!
//! This library drives a user through an ordered sequence of form steps,
//! validating each step before it may be left, aggregating every answer into
//! one submission and handing it to a pluggable sink.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `form`: Field, step and form definitions and the `FormSession` state machine
//! - `forms`: Built-in membership and directory forms
//! - `validation`: Password strength and field format rules
//! - `models`: Field values and IDs
//! - `sinks`: Submission sinks (simulated, JSONL store, chain)
//! - `storage`: JSONL persistence
//! - `crypto`: Secret hashing and zeroized strings
//! - `audit`: Audit log of session events
//! - `wizard`: Interactive step-by-step runner
//! - `config`: Configuration and path management
//! - `display` and `cli`: Terminal output and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use stepform::form::FormSession;
//! use stepform::forms;
//!
//! let mut session = FormSession::new(forms::membership())?;
//! session.update_field("firstName", "Amina")?;
//! session.advance_step()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod form;
pub mod forms;
pub mod models;
pub mod sinks;
pub mod storage;
pub mod validation;
pub mod wizard;

pub use error::{FormError, FormResult};
