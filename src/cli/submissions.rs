//! Stored submission listing

use crate::config::StepformPaths;
use crate::display::{format_submission_details, format_submission_list};
use crate::error::{FormError, FormResult};
use crate::storage::SubmissionStore;

/// List the most recent submissions, or show one in full
pub fn handle_submissions_command(
    paths: &StepformPaths,
    limit: usize,
    show: Option<&str>,
) -> FormResult<()> {
    let store = SubmissionStore::new(paths.submissions_file());

    if let Some(id) = show {
        let submission = store
            .read_all()?
            .into_iter()
            .find(|s| s.id.to_string() == id || s.id.as_uuid().to_string() == id)
            .ok_or_else(|| FormError::Storage(format!("Submission not found: {}", id)))?;
        print!("{}", format_submission_details(&submission));
        return Ok(());
    }

    let recent = store.read_recent(limit)?;
    println!("{}", format_submission_list(&recent));

    let total = store.count()?;
    if total > recent.len() {
        println!("Showing {} of {} submissions.", recent.len(), total);
    }
    Ok(())
}
