//! Turning typed answers into field values

use crate::form::{ChoiceOption, FieldKind, FieldSpec};
use crate::models::{FieldValue, FileAttachment};

/// What a line typed at a field prompt asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Go to the previous step
    Back,
    /// Stop without submitting
    Quit,
    /// Empty the field
    Clear,
    /// Blank line: leave the current value alone
    Keep,
    Value(&'a str),
}

pub fn parse_command(raw: &str) -> Command<'_> {
    match raw.trim() {
        "" => Command::Keep,
        ":back" | ":b" => Command::Back,
        ":quit" | ":q" => Command::Quit,
        ":clear" => Command::Clear,
        _ => Command::Value(raw),
    }
}

/// Answer to a yes/no question; `None` when it is neither
pub fn parse_yes_no(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// The value that empties a field of this kind
pub fn blank_value(kind: &FieldKind) -> FieldValue {
    match kind {
        FieldKind::Consent => FieldValue::Bool(false),
        FieldKind::MultiChoice { .. } => FieldValue::choices(Vec::<String>::new()),
        _ => FieldValue::Text(String::new()),
    }
}

/// Find an option by 1-based number, value or label (case-insensitive)
fn match_option<'a>(options: &'a [ChoiceOption], token: &str) -> Option<&'a ChoiceOption> {
    let token = token.trim();
    if let Ok(n) = token.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i));
    }
    options.iter().find(|o| {
        o.value.eq_ignore_ascii_case(token) || o.label.eq_ignore_ascii_case(token)
    })
}

fn unknown_option(token: &str, options: &[ChoiceOption]) -> String {
    let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
    format!("'{}' is not one of: {}", token.trim(), values.join(", "))
}

/// Convert a typed answer into a value for `field`
///
/// Text answers are kept exactly as typed so the field's own validation sees
/// them unchanged. Errors are messages to show before asking again.
pub fn parse_value(field: &FieldSpec, raw: &str) -> Result<FieldValue, String> {
    match &field.kind {
        FieldKind::Text { .. }
        | FieldKind::Email
        | FieldKind::Phone
        | FieldKind::Password
        | FieldKind::ConfirmPassword { .. } => Ok(FieldValue::Text(raw.to_string())),
        FieldKind::SingleChoice { options } => match_option(options, raw)
            .map(|o| FieldValue::Text(o.value.clone()))
            .ok_or_else(|| unknown_option(raw, options)),
        FieldKind::MultiChoice { options } => {
            let mut chosen = Vec::new();
            for token in raw.split(',').filter(|t| !t.trim().is_empty()) {
                let option = match_option(options, token).ok_or_else(|| unknown_option(token, options))?;
                chosen.push(option.value.clone());
            }
            Ok(FieldValue::choices(chosen))
        }
        FieldKind::File { .. } => FileAttachment::from_path(raw.trim())
            .map(FieldValue::File)
            .map_err(|e| e.to_string()),
        FieldKind::Consent => parse_yes_no(raw)
            .map(FieldValue::Bool)
            .ok_or_else(|| "Please answer yes or no".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms;
    use std::io::Write;

    fn field(form: &crate::form::FormDefinition, name: &str) -> FieldSpec {
        form.field(name).unwrap().clone()
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_command("  "), Command::Keep);
        assert_eq!(parse_command(":back"), Command::Back);
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command(" Amina "), Command::Value(" Amina "));
    }

    #[test]
    fn test_single_choice_by_number_value_or_label() {
        let form = forms::membership();
        let gender = field(&form, "gender");

        assert_eq!(parse_value(&gender, "2"), Ok(FieldValue::from("female")));
        assert_eq!(parse_value(&gender, "MALE"), Ok(FieldValue::from("male")));
        assert_eq!(parse_value(&gender, "Female"), Ok(FieldValue::from("female")));
        assert_eq!(
            parse_value(&gender, "other"),
            Err("'other' is not one of: male, female".to_string())
        );
        assert!(parse_value(&gender, "3").is_err());
    }

    #[test]
    fn test_multi_choice_list() {
        let form = forms::directory();
        let languages = field(&form, "languages");

        assert_eq!(
            parse_value(&languages, "english, 7"),
            Ok(FieldValue::choices(["english", "other"]))
        );
        assert!(parse_value(&languages, "english, klingon").is_err());
    }

    #[test]
    fn test_consent_answers() {
        let form = forms::directory();
        let terms = field(&form, "acceptTerms");

        assert_eq!(parse_value(&terms, "Yes"), Ok(FieldValue::Bool(true)));
        assert_eq!(parse_value(&terms, "n"), Ok(FieldValue::Bool(false)));
        assert!(parse_value(&terms, "maybe").is_err());
    }

    #[test]
    fn test_file_from_path() {
        let form = forms::directory();
        let photo = field(&form, "photo");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 64]).unwrap();

        let value = parse_value(&photo, file.path().to_str().unwrap()).unwrap();
        assert_eq!(value.as_file().unwrap().size_bytes, 64);
        assert!(parse_value(&photo, "/no/such/file.png").is_err());
    }

    #[test]
    fn test_blank_values_are_blank() {
        let form = forms::directory();
        for name in ["firstName", "languages", "acceptTerms"] {
            assert!(blank_value(&field(&form, name).kind).is_blank());
        }
    }
}
