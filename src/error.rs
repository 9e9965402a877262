//! Custom error types for stepform
//!
//! This module defines the error hierarchy for the form engine and its
//! command-line host using thiserror.

use thiserror::Error;

use crate::form::session::SubmissionState;
use crate::models::{SessionId, SubmissionId};

/// One field that failed validation, with the message to show next to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A step transition refused because one or more fields failed validation
///
/// `errors` is in the step's field declaration order, so the first entry is
/// the field the host should focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepBlocked {
    /// 1-based index of the step that failed
    pub step: usize,
    pub errors: Vec<FieldError>,
}

impl StepBlocked {
    /// The field a host should move focus to
    pub fn first_field(&self) -> Option<&str> {
        self.errors.first().map(|e| e.field.as_str())
    }

    /// Names of all failing fields, in declaration order
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }
}

impl std::fmt::Display for StepBlocked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "step {} has {} invalid field(s): {}",
            self.step,
            self.errors.len(),
            self.fields().join(", ")
        )
    }
}

/// Failure reported by a submission sink
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The receiving side refused the payload
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// The payload could not be delivered or stored
    #[error("Submission could not be delivered: {0}")]
    Delivery(String),
}

/// The main error type for stepform operations
#[derive(Error, Debug)]
pub enum FormError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Invalid input outside of a form step (bad CLI argument, bad value shape)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A step could not be left because of field errors
    #[error("Step blocked: {0}")]
    StepBlocked(StepBlocked),

    /// The form has no field with this name
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// No form with this name in the catalog
    #[error("Unknown form: {0}")]
    UnknownForm(String),

    /// A form definition is inconsistent
    #[error("Invalid form definition '{form}': {reason}")]
    InvalidDefinition { form: String, reason: String },

    /// The session does not accept this operation in its current state
    #[error("Session is {state}; {operation} is not allowed")]
    SessionLocked {
        state: SubmissionState,
        operation: &'static str,
    },

    /// A settlement for a submission the session is not waiting on
    #[error("Submission {submission} is not pending for session {session}")]
    NotPending {
        submission: SubmissionId,
        session: SessionId,
    },

    /// Submission attempted before reaching the last step
    #[error("Cannot submit from step {current} of {total}")]
    NotFinalStep { current: usize, total: usize },

    /// The external submission failed
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Hashing errors
    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl FormError {
    /// Check if this is a blocked step
    pub fn is_step_blocked(&self) -> bool {
        matches!(self, Self::StepBlocked(_))
    }

    /// The blocked step details, if this is a blocked step
    pub fn as_step_blocked(&self) -> Option<&StepBlocked> {
        match self {
            Self::StepBlocked(blocked) => Some(blocked),
            _ => None,
        }
    }

    /// Check if this is a validation error of any kind
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::StepBlocked(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for FormError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<StepBlocked> for FormError {
    fn from(blocked: StepBlocked) -> Self {
        Self::StepBlocked(blocked)
    }
}

/// Result type alias for stepform operations
pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FormError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_step_blocked_display() {
        let err: FormError = StepBlocked {
            step: 2,
            errors: vec![
                FieldError::new("title", "Professional title is required"),
                FieldError::new("languages", "Please select at least one language"),
            ],
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Step blocked: step 2 has 2 invalid field(s): title, languages"
        );
        assert!(err.is_step_blocked());
        assert_eq!(err.as_step_blocked().unwrap().first_field(), Some("title"));
    }

    #[test]
    fn test_session_locked_display() {
        let err = FormError::SessionLocked {
            state: SubmissionState::Submitting,
            operation: "editing",
        };
        assert_eq!(err.to_string(), "Session is submitting; editing is not allowed");
    }

    #[test]
    fn test_not_pending_is_not_validation() {
        let err = FormError::NotPending {
            submission: SubmissionId::new(),
            session: SessionId::new(),
        };
        assert!(!err.is_validation());
        assert!(err.to_string().contains("is not pending for session"));
    }

    #[test]
    fn test_submission_error_is_transparent() {
        let err: FormError = SubmissionError::Rejected("duplicate email".into()).into();
        assert_eq!(err.to_string(), "Submission rejected: duplicate email");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let form_err: FormError = io_err.into();
        assert!(matches!(form_err, FormError::Io(_)));
    }
}
