//! Stored submission display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::form::Submission;

#[derive(Tabled)]
struct SubmissionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Form")]
    form: String,
    #[tabled(rename = "Submitted")]
    submitted: String,
    #[tabled(rename = "Attempt")]
    attempt: u32,
    #[tabled(rename = "Fields")]
    fields: usize,
}

/// Format stored submissions as a table
pub fn format_submission_list(submissions: &[Submission]) -> String {
    if submissions.is_empty() {
        return "No submissions found.".to_string();
    }

    let rows = submissions.iter().map(|s| SubmissionRow {
        id: s.id.to_string(),
        form: s.form.clone(),
        submitted: s.submitted_at.format("%Y-%m-%d %H:%M").to_string(),
        attempt: s.attempt,
        fields: s.fields.len(),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

/// Format one stored submission with its values
pub fn format_submission_details(submission: &Submission) -> String {
    let mut output = String::new();

    output.push_str(&format!("Submission: {}\n", submission.id));
    output.push_str(&format!("  Form:      {}\n", submission.form));
    output.push_str(&format!("  Session:   {}\n", submission.session_id));
    output.push_str(&format!(
        "  Submitted: {}\n",
        submission.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("  Attempt:   {}\n", submission.attempt));

    for (name, value) in &submission.fields {
        output.push_str(&format!("  {}: {}\n", name, value));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldMap, FieldValue, SessionId, SubmissionId};
    use chrono::Utc;

    fn submission() -> Submission {
        let mut fields = FieldMap::new();
        fields.insert("city".into(), FieldValue::from("Kampala"));
        fields.insert("languages".into(), FieldValue::choices(["english", "luganda"]));
        Submission {
            id: SubmissionId::new(),
            session_id: SessionId::new(),
            form: "directory".into(),
            attempt: 2,
            submitted_at: Utc::now(),
            fields,
            secrets: Default::default(),
        }
    }

    #[test]
    fn test_list() {
        let sub = submission();
        let output = format_submission_list(std::slice::from_ref(&sub));
        assert!(output.contains(&sub.id.to_string()));
        assert!(output.contains("directory"));
        assert_eq!(format_submission_list(&[]), "No submissions found.");
    }

    #[test]
    fn test_details() {
        let output = format_submission_details(&submission());
        assert!(output.contains("  Attempt:   2\n"));
        assert!(output.contains("  languages: english, luganda\n"));
    }
}
