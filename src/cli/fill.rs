//! Interactive form filling

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::{audit_logger, resolve_definition};
use crate::config::{Settings, StepformPaths};
use crate::error::{FormError, FormResult};
use crate::form::{FormSession, Submission};
use crate::sinks;
use crate::wizard::{TerminalPrompter, Wizard, WizardOutcome};

/// Arguments of `stepform fill`
#[derive(Debug, Args)]
pub struct FillArgs {
    /// Form name (defaults to the `default_form` setting)
    pub form: Option<String>,

    /// Load the form definition from a JSON or YAML file
    #[arg(short, long)]
    pub definition: Option<PathBuf>,

    /// Validate every step but do not submit
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the wizard on a form in the terminal
pub fn handle_fill_command(
    args: FillArgs,
    paths: &StepformPaths,
    settings: &Settings,
) -> FormResult<()> {
    let name = args.form.as_deref().unwrap_or(&settings.default_form);
    let definition = resolve_definition(name, args.definition.as_deref(), paths, settings)?;

    if !args.dry_run && settings.store_submissions {
        paths.ensure_directories()?;
    }

    let mut session = FormSession::new(definition)?.with_notifier(|submission: &Submission| {
        info!(
            submission = %submission.id,
            form = %submission.form,
            fields = submission.fields.len(),
            "registration complete"
        );
    });

    let mut sink = sinks::from_settings(settings, paths);
    let mut wizard =
        Wizard::new(TerminalPrompter::new(), audit_logger(paths, settings)).dry_run(args.dry_run);

    match wizard.run(&mut session, &mut sink)? {
        WizardOutcome::Completed(_) | WizardOutcome::Reviewed | WizardOutcome::Abandoned => Ok(()),
        WizardOutcome::Failed(err) => Err(FormError::Submission(err)),
    }
}
