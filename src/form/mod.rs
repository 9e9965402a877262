//! Multi-step form engine
//!
//! - `definition`: forms, steps, field specs and their rules
//! - `session`: the `FormSession` state machine
//! - `submission`: submission payloads and the sink/notifier callbacks
//!
//! # Example
//!
//! ```rust,ignore
//! use stepform::form::{FormSession, Submission};
//! use stepform::forms;
//!
//! let mut session = FormSession::new(forms::directory())?
//!     .with_notifier(|s: &Submission| println!("received {}", s.id));
//! session.update_field("firstName", "Amina")?;
//! session.advance_step()?;
//! ```

pub mod definition;
pub mod session;
pub mod submission;

pub use definition::{
    ChoiceOption, Dependency, FieldKind, FieldSpec, FormDefinition, SecretKind, StepDefinition,
};
pub use session::{FormSession, StepStatus, SubmissionState};
pub use submission::{CompletionNotifier, Submission, SubmissionSink, SubmitOutcome};
