//! Audit entry data structures
//!
//! Defines the session events that are recorded and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StepBlocked;
use crate::form::{FormSession, Submission};
use crate::models::SessionId;

/// Kinds of session events that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// A session was opened on a form
    SessionStarted,
    /// The session moved to the next step
    StepAdvanced,
    /// A step could not be left because of invalid fields
    StepBlocked,
    /// The sink accepted the submission
    SubmissionCompleted,
    /// The sink rejected the submission
    SubmissionFailed,
    /// The session was abandoned before completing
    SessionAbandoned,
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::SessionStarted => write!(f, "STARTED"),
            Event::StepAdvanced => write!(f, "ADVANCED"),
            Event::StepBlocked => write!(f, "BLOCKED"),
            Event::SubmissionCompleted => write!(f, "COMPLETED"),
            Event::SubmissionFailed => write!(f, "FAILED"),
            Event::SessionAbandoned => write!(f, "ABANDONED"),
        }
    }
}

/// A single audit log entry
///
/// Field values are never recorded, only field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the event occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub event: Event,

    pub session_id: SessionId,

    /// Name of the form definition
    pub form: String,

    /// 1-based step the event refers to
    pub step: usize,

    /// Field names involved (failing fields, or the submitted payload)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    fn for_session(event: Event, session: &FormSession, step: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
            session_id: session.id(),
            form: session.definition().name.clone(),
            step,
            fields: Vec::new(),
            detail: None,
        }
    }

    pub fn started(session: &FormSession) -> Self {
        let mut entry = Self::for_session(Event::SessionStarted, session, session.current_step());
        entry.detail = Some(format!("{} step(s)", session.total_steps()));
        entry
    }

    /// `from` is the step that was left
    pub fn advanced(session: &FormSession, from: usize) -> Self {
        let mut entry = Self::for_session(Event::StepAdvanced, session, from);
        entry.detail = Some(format!("now on step {}", session.current_step()));
        entry
    }

    pub fn blocked(session: &FormSession, blocked: &StepBlocked) -> Self {
        let mut entry = Self::for_session(Event::StepBlocked, session, blocked.step);
        entry.fields = blocked.fields().into_iter().map(str::to_string).collect();
        entry
    }

    pub fn completed(session: &FormSession, submission: &Submission) -> Self {
        let mut entry =
            Self::for_session(Event::SubmissionCompleted, session, session.current_step());
        entry.fields = submission.fields.keys().cloned().collect();
        entry.detail = Some(format!(
            "submission {} (attempt {})",
            submission.id, submission.attempt
        ));
        entry
    }

    pub fn failed(session: &FormSession, reason: impl Into<String>) -> Self {
        let mut entry = Self::for_session(Event::SubmissionFailed, session, session.current_step());
        entry.detail = Some(reason.into());
        entry
    }

    pub fn abandoned(session: &FormSession) -> Self {
        Self::for_session(Event::SessionAbandoned, session, session.current_step())
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {} step {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.event,
            self.form,
            self.session_id,
            self.step
        );

        if let Some(detail) = &self.detail {
            output.push_str(&format!(" ({})", detail));
        }

        if !self.fields.is_empty() {
            output.push_str(&format!("\n  Fields: {}", self.fields.join(", ")));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use crate::forms;

    #[test]
    fn test_event_display() {
        assert_eq!(Event::SessionStarted.to_string(), "STARTED");
        assert_eq!(Event::StepBlocked.to_string(), "BLOCKED");
        assert_eq!(Event::SubmissionFailed.to_string(), "FAILED");
    }

    #[test]
    fn test_blocked_entry_lists_fields() {
        let session = FormSession::new(forms::directory()).unwrap();
        let blocked = StepBlocked {
            step: 1,
            errors: vec![
                FieldError::new("firstName", "First Name is required"),
                FieldError::new("email", "Invalid email address"),
            ],
        };

        let entry = AuditEntry::blocked(&session, &blocked);
        assert_eq!(entry.event, Event::StepBlocked);
        assert_eq!(entry.form, "directory");
        assert_eq!(entry.fields, vec!["firstName", "email"]);
    }

    #[test]
    fn test_serialization_skips_empty() {
        let session = FormSession::new(forms::membership()).unwrap();
        let entry = AuditEntry::abandoned(&session);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"], "session_abandoned");
        assert!(json.get("fields").is_none());
        assert!(json.get("detail").is_none());

        let back: AuditEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back.session_id, session.id());
    }

    #[test]
    fn test_human_readable_format() {
        let session = FormSession::new(forms::membership()).unwrap();
        let formatted = AuditEntry::started(&session).format_human_readable();
        assert!(formatted.contains("STARTED"));
        assert!(formatted.contains("membership"));
        assert!(formatted.contains("3 step(s)"));
    }
}
