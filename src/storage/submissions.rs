//! Stored submissions
//!
//! Each completed submission is appended to `data/submissions.jsonl`.
//! Password fields are replaced by an Argon2id hash (or left out when hashing
//! is disabled) and confirmation fields are always left out.

use std::path::PathBuf;

use tracing::debug;
use zeroize::Zeroize;

use super::file_io::{append_jsonl, read_jsonl};
use crate::crypto::{hash_secret, HashParams};
use crate::error::FormResult;
use crate::form::{SecretKind, Submission};
use crate::models::FieldValue;

/// Append-only store of submissions
#[derive(Debug, Clone)]
pub struct SubmissionStore {
    path: PathBuf,
    hash_secrets: bool,
    params: HashParams,
}

impl SubmissionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            hash_secrets: true,
            params: HashParams::default(),
        }
    }

    /// Store password fields as hashes (`true`) or drop them (`false`)
    pub fn hash_secrets(mut self, enabled: bool) -> Self {
        self.hash_secrets = enabled;
        self
    }

    pub fn with_params(mut self, params: HashParams) -> Self {
        self.params = params;
        self
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Copy of `submission` that is safe to write to disk
    pub fn redact(&self, submission: &Submission) -> FormResult<Submission> {
        let mut stored = submission.clone();
        stored.secrets.clear();

        for (name, kind) in &submission.secrets {
            let Some(mut value) = stored.fields.remove(name) else {
                continue;
            };
            if *kind == SecretKind::Password && self.hash_secrets {
                if let Some(text) = value.as_text() {
                    let hash = hash_secret(text, &self.params)?;
                    stored.fields.insert(name.clone(), FieldValue::Text(hash));
                }
            }
            value.zeroize();
        }

        Ok(stored)
    }

    /// Redact and append one submission
    pub fn append(&self, submission: &Submission) -> FormResult<Submission> {
        let stored = self.redact(submission)?;
        append_jsonl(&self.path, std::slice::from_ref(&stored))?;
        debug!(submission = %stored.id, path = %self.path.display(), "submission stored");
        Ok(stored)
    }

    /// All stored submissions, oldest first
    pub fn read_all(&self) -> FormResult<Vec<Submission>> {
        read_jsonl(&self.path)
    }

    /// The most recent `count` submissions, newest first
    pub fn read_recent(&self, count: usize) -> FormResult<Vec<Submission>> {
        let mut all = self.read_all()?;
        all.reverse();
        all.truncate(count);
        Ok(all)
    }

    pub fn count(&self) -> FormResult<usize> {
        Ok(self.read_all()?.len())
    }
}
