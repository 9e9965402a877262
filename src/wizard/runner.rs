//! Interactive, step-by-step filling of a form session

use tracing::debug;

use super::input::{blank_value, parse_command, parse_value, parse_yes_no, Command};
use super::prompter::Prompter;
use crate::audit::{AuditEntry, AuditLogger};
use crate::crypto::SecureString;
use crate::display;
use crate::error::{FormError, FormResult, StepBlocked, SubmissionError};
use crate::form::{FieldKind, FieldSpec, FormSession, SubmissionSink, SubmitOutcome};
use crate::models::SubmissionId;

/// How a wizard run ended
#[derive(Debug, Clone, PartialEq)]
pub enum WizardOutcome {
    /// The sink accepted the submission
    Completed(SubmissionId),
    /// Dry run: every step validated, nothing submitted
    Reviewed,
    /// The sink rejected the submission and the user stopped retrying
    Failed(SubmissionError),
    /// The user quit, or input ran out, before submitting
    Abandoned,
}

enum Flow {
    Next,
    Back,
    Quit,
}

enum Finish {
    Done(WizardOutcome),
    Blocked(StepBlocked),
    Edit,
    Quit,
}

/// Raw answer to a field prompt
enum Answer {
    Plain(String),
    Secret(SecureString),
}

impl Answer {
    fn as_str(&self) -> &str {
        match self {
            Answer::Plain(s) => s,
            Answer::Secret(s) => s.as_str(),
        }
    }
}

/// Drives a `FormSession` through its steps by prompting for each field
///
/// Blank input keeps the current value, `:back` returns to the previous step,
/// `:clear` empties a field and `:quit` abandons the session. When a step is
/// blocked its errors are shown and prompting resumes at the first failing
/// field.
pub struct Wizard<P: Prompter> {
    prompter: P,
    audit: AuditLogger,
    dry_run: bool,
}

impl<P: Prompter> Wizard<P> {
    pub fn new(prompter: P, audit: AuditLogger) -> Self {
        Self {
            prompter,
            audit,
            dry_run: false,
        }
    }

    /// Validate everything but never call the sink
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Run the session to completion, failure or abandonment
    pub fn run<S>(&mut self, session: &mut FormSession, sink: &mut S) -> FormResult<WizardOutcome>
    where
        S: SubmissionSink + ?Sized,
    {
        self.audit.record(AuditEntry::started(session));
        self.prompter.say(&format!(
            "{}\nBlank keeps the current value; :back goes to the previous step; :quit stops.\n",
            session.definition().title
        ))?;

        let mut resume: Option<String> = None;

        loop {
            let step = session.current_step();
            let fields = session.current_step_definition().fields.clone();
            self.prompter.say(&display::format_step_header(session))?;

            let start = resume
                .take()
                .and_then(|name| fields.iter().position(|f| f.name == name))
                .unwrap_or(0);

            match self.fill_fields(session, &fields[start..])? {
                Flow::Next => {}
                Flow::Back => {
                    if step > 1 {
                        session.retreat_step()?;
                    } else {
                        self.prompter.say("Already on the first step.")?;
                    }
                    continue;
                }
                Flow::Quit => return self.abandon(session),
            }

            if !session.is_final_step() {
                match session.advance_step() {
                    Ok(_) => self.audit.record(AuditEntry::advanced(session, step)),
                    Err(FormError::StepBlocked(blocked)) => {
                        resume = self.report_blocked(session, &blocked)?;
                    }
                    Err(e) => return Err(e),
                }
                continue;
            }

            match self.finish(session, sink)? {
                Finish::Done(outcome) => return Ok(outcome),
                Finish::Blocked(blocked) => {
                    while session.current_step() > blocked.step {
                        session.retreat_step()?;
                    }
                    resume = self.report_blocked(session, &blocked)?;
                }
                Finish::Edit => {}
                Finish::Quit => return self.abandon(session),
            }
        }
    }

    /// Optional fields that only matter when another answer makes them
    /// mandatory are not asked for until then
    fn skip(field: &FieldSpec, session: &FormSession) -> bool {
        field.required_when.is_some()
            && !field.is_mandatory(session.fields())
            && session.field(&field.name).map_or(true, |v| v.is_blank())
    }

    fn read_answer(&mut self, field: &FieldSpec, prompt: &str) -> FormResult<Option<Answer>> {
        if field.kind.is_secret() {
            Ok(self.prompter.prompt_secret(prompt)?.map(Answer::Secret))
        } else {
            Ok(self.prompter.prompt(prompt)?.map(Answer::Plain))
        }
    }

    fn fill_fields(&mut self, session: &mut FormSession, fields: &[FieldSpec]) -> FormResult<Flow> {
        for field in fields {
            if Self::skip(field, session) {
                continue;
            }

            let choices = display::format_choices(field);
            loop {
                if !choices.is_empty() {
                    self.prompter.say(choices.trim_end())?;
                }
                if let Some(error) = session.error(&field.name) {
                    self.prompter.say(&format!("  ! {}", error))?;
                }

                let prompt = display::format_field_prompt(field, session);
                let Some(answer) = self.read_answer(field, &prompt)? else {
                    return Ok(Flow::Quit);
                };

                match parse_command(answer.as_str()) {
                    Command::Back => return Ok(Flow::Back),
                    Command::Quit => return Ok(Flow::Quit),
                    Command::Keep => break,
                    Command::Clear => {
                        session.update_field(&field.name, blank_value(&field.kind))?;
                        break;
                    }
                    Command::Value(text) => match parse_value(field, text) {
                        Ok(value) => {
                            session.update_field(&field.name, value)?;
                            if field.kind == FieldKind::Password {
                                self.prompter
                                    .say(&display::format_strength(&session.password_strength()))?;
                            }
                            break;
                        }
                        Err(message) => self.prompter.say(&format!("  ! {}", message))?,
                    },
                }
            }
        }

        Ok(Flow::Next)
    }

    /// Show a blocked step and return the field to resume at
    fn report_blocked(
        &mut self,
        session: &FormSession,
        blocked: &StepBlocked,
    ) -> FormResult<Option<String>> {
        self.audit.record(AuditEntry::blocked(session, blocked));
        self.prompter
            .say(&display::format_blocked(blocked, session.definition()))?;
        Ok(session.focus_target(blocked).map(|f| f.name.clone()))
    }

    /// Ask until the answer is yes, no or blank (`default`)
    fn confirm(&mut self, question: &str, default: bool) -> FormResult<Option<bool>> {
        loop {
            let Some(answer) = self.prompter.prompt(question)? else {
                return Ok(None);
            };
            if answer.trim().is_empty() {
                return Ok(Some(default));
            }
            match parse_yes_no(&answer) {
                Some(choice) => return Ok(Some(choice)),
                None => self.prompter.say("Please answer yes or no.")?,
            }
        }
    }

    fn finish<S>(&mut self, session: &mut FormSession, sink: &mut S) -> FormResult<Finish>
    where
        S: SubmissionSink + ?Sized,
    {
        self.prompter.say(&format!(
            "Review your answers:\n{}",
            display::format_review(session)
        ))?;

        if self.dry_run {
            if let Some(blocked) = session.validate_all().into_iter().next() {
                return Ok(Finish::Blocked(blocked));
            }
            self.prompter.say("Dry run: every step is valid; nothing was submitted.")?;
            return Ok(Finish::Done(WizardOutcome::Reviewed));
        }

        match self.confirm("Submit now? (yes/no) [yes]: ", true)? {
            None => return Ok(Finish::Quit),
            Some(false) => return Ok(Finish::Edit),
            Some(true) => {}
        }

        loop {
            let submission = match session.begin_submission() {
                Ok(SubmitOutcome::Pending(submission)) => submission,
                Ok(_) => {
                    return Err(FormError::SessionLocked {
                        state: session.state(),
                        operation: "submitting",
                    })
                }
                Err(FormError::StepBlocked(blocked)) => return Ok(Finish::Blocked(blocked)),
                Err(e) => return Err(e),
            };

            self.prompter.say("Submitting...")?;
            let result = sink.submit(&submission);

            match session.finish_submission(&submission, result) {
                Ok(_) => {
                    self.audit.record(AuditEntry::completed(session, &submission));
                    self.prompter
                        .say(&format!("Submission {} received. Thank you!", submission.id))?;
                    return Ok(Finish::Done(WizardOutcome::Completed(submission.id)));
                }
                Err(FormError::Submission(err)) => {
                    self.audit.record(AuditEntry::failed(session, err.to_string()));
                    self.prompter.say(&format!("{}", err))?;
                    if self.confirm("Try again? (yes/no) [yes]: ", true)? != Some(true) {
                        debug!(session = %session.id(), "retry declined");
                        return Ok(Finish::Done(WizardOutcome::Failed(err)));
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn abandon(&mut self, session: &FormSession) -> FormResult<WizardOutcome> {
        self.audit.record(AuditEntry::abandoned(session));
        self.prompter.say("Stopped; nothing was submitted.")?;
        Ok(WizardOutcome::Abandoned)
    }
}
