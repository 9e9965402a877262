//! Static form structure
//!
//! A form is an ordered list of steps; a step is an ordered list of field
//! specs. Each spec carries a tagged `FieldKind` that selects the rule applied
//! to its value, so the stepper never needs to know what a step looks like on
//! screen.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FormError, FormResult};
use crate::models::{FieldMap, FieldValue};
use crate::validation::{self, DEFAULT_MAX_UPLOAD_BYTES};

/// One entry of a radio group, select or checkbox group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Build a list of options from `(value, label)` pairs
pub fn options(pairs: &[(&str, &str)]) -> Vec<ChoiceOption> {
    pairs
        .iter()
        .map(|(value, label)| ChoiceOption::new(*value, *label))
        .collect()
}

/// Validator class of a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text {
        #[serde(default)]
        multiline: bool,
    },
    Email,
    Phone,
    Password,
    /// Must equal the value of the password field named by `of`
    ConfirmPassword { of: String },
    SingleChoice { options: Vec<ChoiceOption> },
    MultiChoice { options: Vec<ChoiceOption> },
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_bytes: Option<u64>,
    },
    Consent,
}

impl FieldKind {
    pub fn options(&self) -> Option<&[ChoiceOption]> {
        match self {
            Self::SingleChoice { options } | Self::MultiChoice { options } => Some(options),
            _ => None,
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword { .. })
    }

    /// Short name used in outlines
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text { multiline: false } => "text",
            Self::Text { multiline: true } => "long text",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Password => "password",
            Self::ConfirmPassword { .. } => "confirm password",
            Self::SingleChoice { .. } => "single choice",
            Self::MultiChoice { .. } => "multiple choice",
            Self::File { .. } => "file",
            Self::Consent => "consent",
        }
    }
}

/// Condition under which an otherwise optional field becomes mandatory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "when", rename_all = "snake_case")]
pub enum Dependency {
    /// Another field holds exactly this text value
    Equals { field: String, value: String },
    /// A checkbox group has this option checked
    Includes { field: String, option: String },
}

impl Dependency {
    pub fn field(&self) -> &str {
        match self {
            Self::Equals { field, .. } | Self::Includes { field, .. } => field,
        }
    }

    pub fn holds(&self, fields: &FieldMap) -> bool {
        match self {
            Self::Equals { field, value } => fields
                .get(field)
                .and_then(FieldValue::as_text)
                .is_some_and(|v| v == value.as_str()),
            Self::Includes { field, option } => fields
                .get(field)
                .and_then(FieldValue::as_choices)
                .is_some_and(|set| set.contains(option)),
        }
    }
}

/// Declaration of one field within a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_when: Option<Dependency>,
    /// Replaces the default "is required" message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            required_when: None,
            message: None,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text { multiline: false })
    }

    pub fn long_text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text { multiline: true })
    }

    pub fn email(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn phone(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Phone)
    }

    pub fn password(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Password)
    }

    pub fn confirm_password(name: &str, label: &str, of: &str) -> Self {
        Self::new(name, label, FieldKind::ConfirmPassword { of: of.into() })
    }

    pub fn single_choice(name: &str, label: &str, options: Vec<ChoiceOption>) -> Self {
        Self::new(name, label, FieldKind::SingleChoice { options })
    }

    pub fn multi_choice(name: &str, label: &str, options: Vec<ChoiceOption>) -> Self {
        Self::new(name, label, FieldKind::MultiChoice { options })
    }

    pub fn file(name: &str, label: &str, max_bytes: u64) -> Self {
        Self::new(name, label, FieldKind::File { max_bytes: Some(max_bytes) })
    }

    pub fn consent(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Consent)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mandatory only while `field` holds `value`
    pub fn required_when_equals(mut self, field: &str, value: &str) -> Self {
        self.required_when = Some(Dependency::Equals {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Mandatory only while checkbox group `field` has `option` checked
    pub fn required_when_checked(mut self, field: &str, option: &str) -> Self {
        self.required_when = Some(Dependency::Includes {
            field: field.into(),
            option: option.into(),
        });
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether the field must be filled in given the current values
    pub fn is_mandatory(&self, fields: &FieldMap) -> bool {
        self.required
            || self
                .required_when
                .as_ref()
                .is_some_and(|dep| dep.holds(fields))
    }

    /// Message shown when a mandatory field is left blank
    pub fn required_message(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        match self.kind {
            FieldKind::MultiChoice { .. } => {
                format!("Please select at least one {}", self.label.to_lowercase())
            }
            FieldKind::Consent => format!("{} must be accepted", self.label),
            _ => format!("{} is required", self.label),
        }
    }

    /// Validate this field against the accumulated values
    ///
    /// Returns the message to display, or `None` when the field is fine.
    /// Blank optional fields pass; optional fields that hold a value are still
    /// format-checked.
    pub fn validate(&self, fields: &FieldMap) -> Option<String> {
        let value = match fields.get(&self.name) {
            Some(value) if !value.is_blank() => value,
            _ => return self.is_mandatory(fields).then(|| self.required_message()),
        };

        self.check_value(value, fields)
    }

    fn check_value(&self, value: &FieldValue, fields: &FieldMap) -> Option<String> {
        let wrong_shape = || {
            Some(format!(
                "{} cannot hold a {} value",
                self.label,
                value.kind_name()
            ))
        };

        match &self.kind {
            FieldKind::Text { .. } => value.as_text().map_or_else(wrong_shape, |_| None),
            FieldKind::Email => match value.as_text() {
                Some(text) if validation::is_valid_email(text) => None,
                Some(_) => Some(validation::rules::MSG_INVALID_EMAIL.to_string()),
                None => wrong_shape(),
            },
            FieldKind::Phone => match value.as_text() {
                Some(text) if validation::is_valid_phone(text) => None,
                Some(_) => Some(validation::rules::MSG_INVALID_PHONE.to_string()),
                None => wrong_shape(),
            },
            FieldKind::Password => match value.as_text() {
                Some(text) if validation::is_strong_password(text) => None,
                Some(_) => Some(validation::rules::MSG_WEAK_PASSWORD.to_string()),
                None => wrong_shape(),
            },
            FieldKind::ConfirmPassword { of } => {
                let password = fields.get(of).and_then(FieldValue::as_text).unwrap_or("");
                match value.as_text() {
                    Some(text) if validation::passwords_match(password, text) => None,
                    Some(_) => Some(validation::rules::MSG_PASSWORD_MISMATCH.to_string()),
                    None => wrong_shape(),
                }
            }
            FieldKind::SingleChoice { options } => match value.as_text() {
                Some(text) if options.iter().any(|o| o.value == text) => None,
                Some(text) => Some(format!("'{}' is not a valid option for {}", text, self.label)),
                None => wrong_shape(),
            },
            FieldKind::MultiChoice { options } => match value.as_choices() {
                Some(set) => set
                    .iter()
                    .find(|chosen| !options.iter().any(|o| &o.value == *chosen))
                    .map(|bad| format!("'{}' is not a valid option for {}", bad, self.label)),
                None => wrong_shape(),
            },
            FieldKind::File { max_bytes } => match value.as_file() {
                Some(file) => {
                    let limit = max_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
                    (!validation::file_within_limit(file.size_bytes, limit))
                        .then(|| validation::file_too_large_message(limit))
                }
                None => wrong_shape(),
            },
            // A present consent value is a checked box
            FieldKind::Consent => value.as_bool().map_or_else(wrong_shape, |_| None),
        }
    }
}

/// One page of a multi-step form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub key: String,
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

impl StepDefinition {
    pub fn new(key: &str, title: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            fields,
        }
    }

    /// Fields that are unconditionally required, in declaration order
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Run every field rule of this step; errors come back in declaration order
    pub fn validate(&self, fields: &FieldMap) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|spec| spec.validate(fields).map(|msg| FieldError::new(&spec.name, msg)))
            .collect()
    }
}

/// Which stored form of a password-class field is allowed at rest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretKind {
    /// Stored only as a hash
    Password,
    /// Never stored
    Confirmation,
}

/// A complete multi-step form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub steps: Vec<StepDefinition>,
}

impl FormDefinition {
    pub fn new(name: &str, title: &str, steps: Vec<StepDefinition>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: String::new(),
            steps,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.into();
        self
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Step by 1-based index
    pub fn step(&self, index: usize) -> Option<&StepDefinition> {
        index.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.steps.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields().find(|f| f.name == name)
    }

    /// 1-based index of the step declaring `name`
    pub fn step_of(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.contains(name)).map(|i| i + 1)
    }

    /// Password-class fields and how they may be stored
    pub fn secret_fields(&self) -> Vec<(String, SecretKind)> {
        self.fields()
            .filter_map(|f| match f.kind {
                FieldKind::Password => Some((f.name.clone(), SecretKind::Password)),
                FieldKind::ConfirmPassword { .. } => Some((f.name.clone(), SecretKind::Confirmation)),
                _ => None,
            })
            .collect()
    }

    /// Give file fields without an explicit limit the supplied one
    pub fn with_default_upload_limit(mut self, limit: u64) -> Self {
        for step in &mut self.steps {
            for field in &mut step.fields {
                if let FieldKind::File { max_bytes } = &mut field.kind {
                    max_bytes.get_or_insert(limit);
                }
            }
        }
        self
    }

    /// Check the definition for internal consistency
    pub fn check(&self) -> FormResult<()> {
        let invalid = |reason: String| FormError::InvalidDefinition {
            form: self.name.clone(),
            reason,
        };

        if self.steps.is_empty() {
            return Err(invalid("a form needs at least one step".into()));
        }

        let mut seen = HashSet::new();
        for field in self.fields() {
            if field.name.is_empty() || field.name.contains('.') {
                return Err(invalid(format!(
                    "field name '{}' must be non-empty and contain no '.'",
                    field.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(invalid(format!("field '{}' is declared twice", field.name)));
            }
        }

        for field in self.fields() {
            match &field.kind {
                FieldKind::ConfirmPassword { of } => {
                    let target = self.field(of).map(|f| &f.kind);
                    if !matches!(target, Some(FieldKind::Password)) {
                        return Err(invalid(format!(
                            "'{}' confirms '{}', which is not a password field",
                            field.name, of
                        )));
                    }
                }
                FieldKind::SingleChoice { options } | FieldKind::MultiChoice { options } => {
                    if options.is_empty() {
                        return Err(invalid(format!("'{}' has no options", field.name)));
                    }
                }
                _ => {}
            }

            if let Some(dep) = &field.required_when {
                let Some(target) = self.field(dep.field()) else {
                    return Err(invalid(format!(
                        "'{}' depends on unknown field '{}'",
                        field.name,
                        dep.field()
                    )));
                };
                if let Dependency::Includes { option, .. } = dep {
                    let known = matches!(&target.kind, FieldKind::MultiChoice { options }
                        if options.iter().any(|o| &o.value == option));
                    if !known {
                        return Err(invalid(format!(
                            "'{}' depends on option '{}' that '{}' does not offer",
                            field.name, option, target.name
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Load a definition from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> FormResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FormError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        let definition: FormDefinition = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)?,
            _ => serde_json::from_str(&contents)?,
        };

        definition.check()?;
        Ok(definition)
    }
}
