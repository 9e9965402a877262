//! Password strength checklist

use crate::display::format_strength;
use crate::error::{FormError, FormResult};
use crate::validation::{rules::MSG_WEAK_PASSWORD, PasswordStrength};
use crate::wizard::{Prompter, TerminalPrompter};

/// Print the strength checklist for `value`, prompting with hidden input
/// when it is omitted
///
/// Fails when the password does not meet every requirement.
pub fn handle_password_command(value: Option<String>) -> FormResult<()> {
    let strength = match value {
        Some(value) => PasswordStrength::evaluate(&value),
        None => {
            let secret = TerminalPrompter::new()
                .prompt_secret("Password: ")?
                .ok_or_else(|| FormError::Validation("No password entered".into()))?;
            PasswordStrength::evaluate(secret.as_str())
        }
    };

    print!("{}", format_strength(&strength));

    if strength.is_valid() {
        Ok(())
    } else {
        Err(FormError::Validation(MSG_WEAK_PASSWORD.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weak_password_fails() {
        let err = handle_password_command(Some("abc".into())).unwrap_err();
        assert_eq!(err.to_string(), FormError::Validation(MSG_WEAK_PASSWORD.into()).to_string());
        assert!(handle_password_command(Some("Abcdef1!".into())).is_ok());
    }
}
