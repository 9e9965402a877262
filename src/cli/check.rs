//! Non-interactive validation of a form from a file of answers

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::Args;

use super::{audit_logger, resolve_definition};
use crate::audit::AuditEntry;
use crate::config::{Settings, StepformPaths};
use crate::display::format_check_report;
use crate::error::{FormError, FormResult};
use crate::form::{FormDefinition, FormSession, SubmissionSink, SubmitOutcome};
use crate::models::{FieldMap, FieldValue};
use crate::sinks;

/// Arguments of `stepform check`
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Form name
    pub form: String,

    /// JSON or YAML file mapping field names to values
    #[arg(short, long)]
    pub input: PathBuf,

    /// Load the form definition from a JSON or YAML file
    #[arg(short, long)]
    pub definition: Option<PathBuf>,

    /// Submit the answers when every step is valid
    #[arg(long)]
    pub submit: bool,
}

/// Read a field map from JSON, or YAML for `.yaml`/`.yml` files
///
/// Bare JSON numbers are taken as text, so `"phone": 712345678` loads the
/// same way it does from YAML.
pub fn load_answers(path: &Path) -> FormResult<FieldMap> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| FormError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&contents)?),
        _ => parse_json_answers(&contents),
    }
}

fn parse_json_answers(contents: &str) -> FormResult<FieldMap> {
    let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(contents)?;

    raw.into_iter()
        .map(|(name, value)| {
            let value = match value {
                serde_json::Value::Number(n) => FieldValue::Text(n.to_string()),
                other => serde_json::from_value(other).map_err(|e| {
                    FormError::Json(format!("answer '{}' has an unsupported value: {}", name, e))
                })?,
            };
            Ok((name, value))
        })
        .collect()
}

/// Open a session on `definition` holding `answers`
pub fn session_with_answers(definition: FormDefinition, answers: FieldMap) -> FormResult<FormSession> {
    let mut session = FormSession::new(definition)?;
    for (name, value) in answers {
        session.update_field(&name, value)?;
    }
    Ok(session)
}

/// Validate every step and optionally submit
pub fn handle_check_command(
    args: CheckArgs,
    paths: &StepformPaths,
    settings: &Settings,
) -> FormResult<()> {
    let definition = resolve_definition(&args.form, args.definition.as_deref(), paths, settings)?;
    let mut session = session_with_answers(definition, load_answers(&args.input)?)?;

    let results = session.validate_all();
    print!("{}", format_check_report(session.definition(), &results));

    if !results.is_empty() {
        return Err(FormError::Validation(format!(
            "{} step(s) failed validation",
            results.len()
        )));
    }

    if !args.submit {
        return Ok(());
    }

    if settings.store_submissions {
        paths.ensure_directories()?;
    }

    let audit = audit_logger(paths, settings);
    audit.record(AuditEntry::started(&session));
    while !session.is_final_step() {
        let from = session.current_step();
        session.advance_step()?;
        audit.record(AuditEntry::advanced(&session, from));
    }

    let mut sink = sinks::from_settings(settings, paths);
    let submission = match session.begin_submission()? {
        SubmitOutcome::Pending(submission) => submission,
        _ => {
            return Err(FormError::SessionLocked {
                state: session.state(),
                operation: "submitting",
            })
        }
    };

    let result = sink.submit(&submission);
    match session.finish_submission(&submission, result) {
        Ok(_) => {
            audit.record(AuditEntry::completed(&session, &submission));
            println!("Submitted {} (attempt {}).", submission.id, submission.attempt);
            Ok(())
        }
        Err(e) => {
            if let FormError::Submission(err) = &e {
                audit.record(AuditEntry::failed(&session, err.to_string()));
            }
            Err(e)
        }
    }
}
