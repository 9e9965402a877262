//! Stand-in for a real backend: waits, logs and accepts

use std::thread;
use std::time::Duration;

use tracing::info;

use crate::error::SubmissionError;
use crate::form::{Submission, SubmissionSink};

/// Default wait before a simulated submission resolves
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

/// Sink that sleeps for a fixed delay and logs the payload's field names
#[derive(Debug, Clone)]
pub struct SimulatedSink {
    delay: Duration,
    fail_with: Option<String>,
    delivered: u32,
}

impl Default for SimulatedSink {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl SimulatedSink {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fail_with: None,
            delivered: 0,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Reject the next submission with `reason`
    pub fn fail_next(&mut self, reason: impl Into<String>) {
        self.fail_with = Some(reason.into());
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of submissions accepted so far
    pub fn delivered(&self) -> u32 {
        self.delivered
    }
}

impl SubmissionSink for SimulatedSink {
    fn submit(&mut self, submission: &Submission) -> Result<(), SubmissionError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        if let Some(reason) = self.fail_with.take() {
            return Err(SubmissionError::Rejected(reason));
        }

        self.delivered += 1;
        info!(
            submission = %submission.id,
            form = %submission.form,
            attempt = submission.attempt,
            fields = ?submission.field_names(),
            "form submitted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormSession, SubmissionState};
    use crate::forms;
    use crate::models::{FieldMap, SessionId, SubmissionId};
    use chrono::Utc;

    fn submission() -> Submission {
        Submission {
            id: SubmissionId::new(),
            session_id: SessionId::new(),
            form: "membership".into(),
            attempt: 1,
            submitted_at: Utc::now(),
            fields: FieldMap::new(),
            secrets: Default::default(),
        }
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(SimulatedSink::default().delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_fail_next_applies_once() {
        let mut sink = SimulatedSink::from_millis(0);
        sink.fail_next("backend unavailable");

        let err = sink.submit(&submission()).unwrap_err();
        assert_eq!(err, SubmissionError::Rejected("backend unavailable".into()));
        assert_eq!(sink.delivered(), 0);

        sink.submit(&submission()).unwrap();
        assert_eq!(sink.delivered(), 1);
    }

    #[test]
    fn test_session_cannot_submit_early() {
        let mut session = FormSession::new(forms::membership()).unwrap();
        let mut sink = SimulatedSink::from_millis(0);

        assert!(session.submit(&mut sink).is_err());
        assert_eq!(session.state(), SubmissionState::Editing);
        assert_eq!(sink.delivered(), 0);
    }
}
