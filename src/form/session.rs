//! The multi-step form state machine
//!
//! A `FormSession` owns the values entered so far, the inline errors from the
//! last validation pass, the current step and the submission state. All
//! transitions are synchronous; the only asynchronous part is the sink, which
//! a host drives through [`FormSession::begin_submission`] and
//! [`FormSession::finish_submission`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
use zeroize::Zeroize;

use super::definition::{FieldKind, FieldSpec, FormDefinition, StepDefinition};
use super::submission::{CompletionNotifier, Submission, SubmissionSink, SubmitOutcome};
use crate::error::{FieldError, FormError, FormResult, StepBlocked, SubmissionError};
use crate::models::{FieldMap, FieldValue, SessionId, SubmissionId};
use crate::validation::PasswordStrength;

/// Where a session is in its submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Editing,
    Submitting,
    Completed,
    Failed,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editing => write!(f, "editing"),
            Self::Submitting => write!(f, "submitting"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// How a step appears in a progress indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Current,
    Upcoming,
}

/// One in-progress registration attempt
pub struct FormSession {
    id: SessionId,
    definition: FormDefinition,
    current_step: usize,
    fields: FieldMap,
    errors: BTreeMap<String, String>,
    state: SubmissionState,
    strength: PasswordStrength,
    pending: Option<SubmissionId>,
    attempts: u32,
    last_error: Option<SubmissionError>,
    notifier: Option<Box<dyn CompletionNotifier>>,
}

impl fmt::Debug for FormSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSession")
            .field("id", &self.id)
            .field("form", &self.definition.name)
            .field("current_step", &self.current_step)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("errors", &self.errors)
            .field("state", &self.state)
            .field("attempts", &self.attempts)
            .finish_non_exhaustive()
    }
}

impl FormSession {
    /// Start a session on step 1 of `definition`
    pub fn new(definition: FormDefinition) -> FormResult<Self> {
        definition.check()?;

        let session = Self {
            id: SessionId::new(),
            definition,
            current_step: 1,
            fields: FieldMap::new(),
            errors: BTreeMap::new(),
            state: SubmissionState::Editing,
            strength: PasswordStrength::default(),
            pending: None,
            attempts: 0,
            last_error: None,
            notifier: None,
        };
        debug!(session = %session.id, form = %session.definition.name, "form session started");
        Ok(session)
    }

    /// Attach the callback told about the completed submission
    pub fn with_notifier(mut self, notifier: impl CompletionNotifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    /// 1-based index of the current step
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.definition.total_steps()
    }

    pub fn is_final_step(&self) -> bool {
        self.current_step == self.total_steps()
    }

    pub fn current_step_definition(&self) -> &StepDefinition {
        &self.definition.steps[self.current_step - 1]
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Inline errors from the last validation pass, minus fields edited since
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Strength of the current password value
    pub fn password_strength(&self) -> PasswordStrength {
        self.strength
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Error from the most recent failed submission attempt
    pub fn last_error(&self) -> Option<&SubmissionError> {
        self.last_error.as_ref()
    }

    /// Every step with its indicator status
    pub fn progress(&self) -> Vec<(usize, &StepDefinition, StepStatus)> {
        self.definition
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let index = i + 1;
                let status = if self.state == SubmissionState::Completed || index < self.current_step {
                    StepStatus::Done
                } else if index == self.current_step {
                    StepStatus::Current
                } else {
                    StepStatus::Upcoming
                };
                (index, step, status)
            })
            .collect()
    }

    fn ensure_editable(&self, operation: &'static str) -> FormResult<()> {
        match self.state {
            SubmissionState::Submitting | SubmissionState::Completed => {
                Err(FormError::SessionLocked {
                    state: self.state,
                    operation,
                })
            }
            SubmissionState::Editing | SubmissionState::Failed => Ok(()),
        }
    }

    /// Set a field value and clear its inline error
    ///
    /// `group.option` toggles one option of a checkbox group and takes a
    /// `Bool`. Editing a failed session returns it to Editing.
    pub fn update_field(&mut self, name: &str, value: impl Into<FieldValue>) -> FormResult<()> {
        self.ensure_editable("editing")?;
        let value = value.into();

        if let Some(spec) = self.definition.field(name) {
            let is_password = matches!(spec.kind, FieldKind::Password);
            if let Some(mut old) = self.fields.insert(name.to_string(), value) {
                old.zeroize();
            }
            if is_password {
                self.recompute_strength(name);
            }
        } else if let Some((group, option)) = name.split_once('.') {
            self.toggle_option(name, group, option, &value)?;
            self.errors.remove(group);
        } else {
            return Err(FormError::UnknownField(name.to_string()));
        }

        self.errors.remove(name);
        if self.state == SubmissionState::Failed {
            self.state = SubmissionState::Editing;
        }
        trace!(session = %self.id, field = name, "field updated");
        Ok(())
    }

    fn toggle_option(
        &mut self,
        name: &str,
        group: &str,
        option: &str,
        value: &FieldValue,
    ) -> FormResult<()> {
        let offered = self
            .definition
            .field(group)
            .and_then(|spec| match &spec.kind {
                FieldKind::MultiChoice { options } => Some(options.iter().any(|o| o.value == option)),
                _ => None,
            });
        match offered {
            Some(true) => {}
            Some(false) | None => return Err(FormError::UnknownField(name.to_string())),
        }

        let checked = value.as_bool().ok_or_else(|| {
            FormError::Validation(format!(
                "'{}' is a checkbox and cannot hold a {} value",
                name,
                value.kind_name()
            ))
        })?;

        let entry = self
            .fields
            .entry(group.to_string())
            .or_insert_with(|| FieldValue::Choices(Default::default()));
        if entry.as_choices().is_none() {
            *entry = FieldValue::Choices(Default::default());
        }
        if let FieldValue::Choices(set) = entry {
            if checked {
                set.insert(option.to_string());
            } else {
                set.remove(option);
            }
        }
        Ok(())
    }

    fn recompute_strength(&mut self, name: &str) {
        let password = self.fields.get(name).and_then(FieldValue::as_text).unwrap_or("");
        self.strength = PasswordStrength::evaluate(password);
    }

    /// Validate one step against the current values without changing anything
    pub fn validate_step(&self, index: usize) -> Vec<FieldError> {
        self.definition
            .step(index)
            .map(|step| step.validate(&self.fields))
            .unwrap_or_default()
    }

    /// Validate every step; one entry per failing step, in step order
    pub fn validate_all(&self) -> Vec<StepBlocked> {
        (1..=self.total_steps())
            .filter_map(|step| {
                let errors = self.validate_step(step);
                (!errors.is_empty()).then_some(StepBlocked { step, errors })
            })
            .collect()
    }

    /// Replace the inline errors of `step` with the result of a fresh pass
    fn record_step_errors(&mut self, step: usize, errors: &[FieldError]) {
        if let Some(definition) = self.definition.step(step) {
            let names: Vec<String> = definition.fields.iter().map(|f| f.name.clone()).collect();
            for name in names {
                self.errors.remove(&name);
            }
        }
        for error in errors {
            self.errors.insert(error.field.clone(), error.message.clone());
        }
    }

    /// Validate the current step and move to the next one
    ///
    /// Returns the new step index. On the last step a successful pass leaves
    /// the index where it is.
    pub fn advance_step(&mut self) -> FormResult<usize> {
        self.ensure_editable("advancing")?;

        let step = self.current_step;
        let errors = self.validate_step(step);
        self.record_step_errors(step, &errors);

        if !errors.is_empty() {
            let blocked = StepBlocked { step, errors };
            warn!(session = %self.id, step, fields = ?blocked.fields(), "step blocked");
            return Err(blocked.into());
        }

        self.current_step = (step + 1).min(self.total_steps());
        debug!(session = %self.id, from = step, to = self.current_step, "step advanced");
        Ok(self.current_step)
    }

    /// Move back one step without validating or discarding anything
    pub fn retreat_step(&mut self) -> FormResult<usize> {
        self.ensure_editable("going back")?;

        let from = self.current_step;
        self.current_step = from.saturating_sub(1).max(1);
        debug!(session = %self.id, from, to = self.current_step, "step retreated");
        Ok(self.current_step)
    }

    /// Validate and move to Submitting
    ///
    /// Calls made while a submission is in flight, or after completion, are
    /// no-ops. Every step is re-validated; the first failing step is reported
    /// as a blocked step and the state is left alone.
    ///
    /// The returned payload carries a copy of every password-class value; it
    /// is wiped when the payload is dropped.
    pub fn begin_submission(&mut self) -> FormResult<SubmitOutcome> {
        match self.state {
            SubmissionState::Submitting => {
                debug!(session = %self.id, "submission already in flight; ignoring");
                return Ok(SubmitOutcome::AlreadySubmitting);
            }
            SubmissionState::Completed => return Ok(SubmitOutcome::AlreadyCompleted),
            SubmissionState::Editing | SubmissionState::Failed => {}
        }

        if !self.is_final_step() {
            return Err(FormError::NotFinalStep {
                current: self.current_step,
                total: self.total_steps(),
            });
        }

        if let Some(blocked) = self.validate_all().into_iter().next() {
            self.record_step_errors(blocked.step, &blocked.errors);
            warn!(session = %self.id, step = blocked.step, fields = ?blocked.fields(), "submission blocked");
            return Err(blocked.into());
        }

        self.attempts += 1;
        let submission = Submission {
            id: SubmissionId::new(),
            session_id: self.id,
            form: self.definition.name.clone(),
            attempt: self.attempts,
            submitted_at: Utc::now(),
            fields: self.fields.clone(),
            secrets: self.definition.secret_fields().into_iter().collect(),
        };
        self.pending = Some(submission.id);
        self.state = SubmissionState::Submitting;
        debug!(session = %self.id, submission = %submission.id, attempt = self.attempts, "submission started");

        Ok(SubmitOutcome::Pending(submission))
    }

    /// Settle the in-flight submission with the sink's result
    ///
    /// Success completes the session and tells the notifier; failure moves the
    /// session to Failed, from which `submit` may be called again.
    pub fn finish_submission(
        &mut self,
        submission: &Submission,
        result: Result<(), SubmissionError>,
    ) -> FormResult<SubmissionState> {
        if self.state != SubmissionState::Submitting || self.pending != Some(submission.id) {
            return Err(FormError::NotPending {
                submission: submission.id,
                session: self.id,
            });
        }
        self.pending = None;

        match result {
            Ok(()) => {
                self.state = SubmissionState::Completed;
                self.last_error = None;
                info!(session = %self.id, submission = %submission.id, form = %submission.form, "submission completed");
                if let Some(notifier) = self.notifier.as_mut() {
                    notifier.on_complete(submission);
                }
                Ok(self.state)
            }
            Err(err) => {
                self.state = SubmissionState::Failed;
                warn!(session = %self.id, submission = %submission.id, error = %err, "submission failed");
                self.last_error = Some(err.clone());
                Err(err.into())
            }
        }
    }

    /// Begin, deliver to `sink` and settle in one call
    pub fn submit<S>(&mut self, sink: &mut S) -> FormResult<SubmissionState>
    where
        S: SubmissionSink + ?Sized,
    {
        match self.begin_submission()? {
            SubmitOutcome::Pending(submission) => {
                let result = sink.submit(&submission);
                self.finish_submission(&submission, result)
            }
            SubmitOutcome::AlreadySubmitting => Ok(SubmissionState::Submitting),
            SubmitOutcome::AlreadyCompleted => Ok(SubmissionState::Completed),
        }
    }

    /// Forget everything and start over on step 1 with a new session ID
    pub fn reset(&mut self) {
        self.wipe_fields();
        self.errors.clear();
        self.id = SessionId::new();
        self.current_step = 1;
        self.state = SubmissionState::Editing;
        self.strength = PasswordStrength::default();
        self.pending = None;
        self.attempts = 0;
        self.last_error = None;
        debug!(session = %self.id, form = %self.definition.name, "form session reset");
    }

    fn wipe_fields(&mut self) {
        for value in self.fields.values_mut() {
            value.zeroize();
        }
        self.fields.clear();
    }

    /// Spec of the field a host should focus for `blocked`
    pub fn focus_target(&self, blocked: &StepBlocked) -> Option<&FieldSpec> {
        blocked.first_field().and_then(|name| self.definition.field(name))
    }
}

impl Drop for FormSession {
    fn drop(&mut self) {
        self.wipe_fields();
    }
}
