//! Sink that appends submissions to the local JSONL store

use crate::error::SubmissionError;
use crate::form::{Submission, SubmissionSink};
use crate::storage::SubmissionStore;

#[derive(Debug, Clone)]
pub struct JsonlSink {
    store: SubmissionStore,
}

impl JsonlSink {
    pub fn new(store: SubmissionStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SubmissionStore {
        &self.store
    }
}

impl SubmissionSink for JsonlSink {
    fn submit(&mut self, submission: &Submission) -> Result<(), SubmissionError> {
        self.store
            .append(submission)
            .map(|_| ())
            .map_err(|e| SubmissionError::Delivery(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldMap, FieldValue, SessionId, SubmissionId};
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_appends_each_submission() {
        let temp_dir = TempDir::new().unwrap();
        let store = SubmissionStore::new(temp_dir.path().join("data").join("subs.jsonl"))
            .hash_secrets(false);
        let mut sink = JsonlSink::new(store);

        let mut fields = FieldMap::new();
        fields.insert("firstName".into(), FieldValue::from("Amina"));
        for attempt in 1..=2 {
            let submission = Submission {
                id: SubmissionId::new(),
                session_id: SessionId::new(),
                form: "directory".into(),
                attempt,
                submitted_at: Utc::now(),
                fields: fields.clone(),
                secrets: Default::default(),
            };
            sink.submit(&submission).unwrap();
        }

        let stored = sink.store().read_all().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].attempt, 2);
        assert_eq!(stored[0].fields["firstName"], FieldValue::from("Amina"));
    }

    #[test]
    fn test_unwritable_path_is_delivery_error() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be
        let path = temp_dir.path().join("subs.jsonl");
        std::fs::create_dir(&path).unwrap();
        let mut sink = JsonlSink::new(SubmissionStore::new(path).hash_secrets(false));

        let submission = Submission {
            id: SubmissionId::new(),
            session_id: SessionId::new(),
            form: "directory".into(),
            attempt: 1,
            submitted_at: Utc::now(),
            fields: FieldMap::new(),
            secrets: Default::default(),
        };
        let err = sink.submit(&submission).unwrap_err();
        assert!(matches!(err, SubmissionError::Delivery(_)));
    }
}
