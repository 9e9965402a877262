//! Audit logger for the append-only audit log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::path::PathBuf;

use tracing::warn;

use crate::error::FormResult;
use crate::storage::{append_jsonl, read_jsonl};

use super::entry::AuditEntry;

/// Handles writing audit entries to the audit log file
///
/// A disabled logger accepts entries and drops them, so callers do not need
/// to check settings before every event.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
    enabled: bool,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            enabled: true,
        }
    }

    pub fn disabled(log_path: PathBuf) -> Self {
        Self {
            log_path,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> FormResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries, flushing once at the end
    pub fn log_batch(&self, entries: &[AuditEntry]) -> FormResult<()> {
        if !self.enabled {
            return Ok(());
        }
        append_jsonl(&self.log_path, entries)
    }

    /// Log an entry, reporting failures through tracing instead of failing
    /// the caller
    pub fn record(&self, entry: AuditEntry) {
        if let Err(e) = self.log(&entry) {
            warn!(error = %e, event = %entry.event, "failed to write audit entry");
        }
    }

    /// Read all audit entries, oldest first
    pub fn read_all(&self) -> FormResult<Vec<AuditEntry>> {
        read_jsonl(&self.log_path)
    }

    /// Read the most recent N entries from the log, oldest first
    pub fn read_recent(&self, count: usize) -> FormResult<Vec<AuditEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Event;
    use crate::form::FormSession;
    use crate::forms;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("audit.log");
        (AuditLogger::new(log_path), temp_dir)
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        let session = FormSession::new(forms::membership()).unwrap();

        logger.log(&AuditEntry::started(&session)).unwrap();
        assert!(logger.exists());

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, Event::SessionStarted);
        assert_eq!(entries[0].session_id, session.id());
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();
        let session = FormSession::new(forms::directory()).unwrap();

        let entries: Vec<AuditEntry> = (1..=4)
            .map(|step| {
                let mut entry = AuditEntry::advanced(&session, step);
                entry.step = step;
                entry
            })
            .collect();
        logger.log_batch(&entries).unwrap();

        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].step, 3);
        assert_eq!(recent[1].step, 4);
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::disabled(temp_dir.path().join("audit.log"));
        let session = FormSession::new(forms::membership()).unwrap();

        logger.record(AuditEntry::abandoned(&session));

        assert!(!logger.exists());
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(!logger.exists());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }
}
