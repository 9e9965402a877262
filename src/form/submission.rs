//! Submission payloads and the two host-supplied callbacks
//!
//! The engine hands a `Submission` to a `SubmissionSink` exactly once per
//! attempt and reports a completed attempt to the `CompletionNotifier` exactly
//! once per session.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::definition::SecretKind;
use crate::error::SubmissionError;
use crate::models::{FieldMap, SessionId, SubmissionId};

/// Snapshot of a session handed to the sink
///
/// Password-class values are wiped when the payload is dropped. A sink or
/// notifier that clones the payload owns the clone's secrets too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub session_id: SessionId,
    pub form: String,
    /// 1 for the first attempt, incremented on each retry after a failure
    pub attempt: u32,
    pub submitted_at: DateTime<Utc>,
    pub fields: FieldMap,
    /// Password-class fields in `fields`; never serialized
    #[serde(skip)]
    pub secrets: BTreeMap<String, SecretKind>,
}

impl Submission {
    /// Field names in the payload, for logging without values
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Overwrite the values of password-class fields in place
    pub fn zeroize_secrets(&mut self) {
        for name in self.secrets.keys() {
            if let Some(value) = self.fields.get_mut(name) {
                value.zeroize();
            }
        }
    }
}

impl Drop for Submission {
    fn drop(&mut self) {
        self.zeroize_secrets();
    }
}

/// Receives the accumulated fields of a session and delivers them somewhere
pub trait SubmissionSink {
    fn submit(&mut self, submission: &Submission) -> Result<(), SubmissionError>;
}

impl<F> SubmissionSink for F
where
    F: FnMut(&Submission) -> Result<(), SubmissionError>,
{
    fn submit(&mut self, submission: &Submission) -> Result<(), SubmissionError> {
        self(submission)
    }
}

/// Told once when a session reaches Completed
pub trait CompletionNotifier {
    fn on_complete(&mut self, submission: &Submission);
}

impl<F> CompletionNotifier for F
where
    F: FnMut(&Submission),
{
    fn on_complete(&mut self, submission: &Submission) {
        self(submission)
    }
}

/// Result of asking a session to start a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The session moved to Submitting; deliver this payload and settle it
    Pending(Submission),
    /// A submission is already in flight; nothing happened
    AlreadySubmitting,
    /// The session already completed; nothing happened
    AlreadyCompleted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;

    fn submission() -> Submission {
        let mut fields = FieldMap::new();
        fields.insert("email".into(), FieldValue::from("a@b.org"));
        fields.insert("password".into(), FieldValue::from("Abcdef1!"));
        Submission {
            id: SubmissionId::new(),
            session_id: SessionId::new(),
            form: "membership".into(),
            attempt: 1,
            submitted_at: Utc::now(),
            fields,
            secrets: BTreeMap::from([("password".to_string(), SecretKind::Password)]),
        }
    }

    #[test]
    fn test_closures_are_sinks_and_notifiers() {
        let mut delivered = 0;
        let mut sink = |_: &Submission| -> Result<(), SubmissionError> {
            delivered += 1;
            Ok(())
        };
        let sub = submission();
        sink.submit(&sub).unwrap();
        sink.submit(&sub).unwrap();
        drop(sink);
        assert_eq!(delivered, 2);

        let mut seen = Vec::new();
        let mut notifier = |s: &Submission| seen.push(s.form.clone());
        notifier.on_complete(&sub);
        drop(notifier);
        assert_eq!(seen, vec!["membership".to_string()]);
    }

    #[test]
    fn test_zeroize_secrets_wipes_only_passwords() {
        let mut sub = submission();
        sub.zeroize_secrets();
        assert_eq!(sub.fields["password"], FieldValue::from(""));
        assert_eq!(sub.fields["email"], FieldValue::from("a@b.org"));
    }

    #[test]
    fn test_secrets_not_serialized() {
        let sub = submission();
        let json = serde_json::to_value(&sub).unwrap();
        assert!(json.get("secrets").is_none());
        assert_eq!(json["fields"]["email"], "a@b.org");
        assert_eq!(sub.field_names(), vec!["email", "password"]);
    }
}
