//! Field-class rules shared by every form
//!
//! Formats are checked with patterns compiled once on first use.

use once_cell::sync::Lazy;
use regex::Regex;

use super::password::PasswordStrength;

/// Default upload limit for file fields (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const MSG_INVALID_EMAIL: &str = "Invalid email address";
pub const MSG_INVALID_PHONE: &str = "Please enter a valid phone number";
pub const MSG_WEAK_PASSWORD: &str = "Password does not meet requirements";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern compiles")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s-]{10,15}$").expect("phone pattern compiles"));

/// `local@domain.tld` over ASCII letters and digits, either case
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Optional leading `+`, then 10 to 15 digits, spaces or hyphens
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

pub fn is_strong_password(value: &str) -> bool {
    PasswordStrength::evaluate(value).is_valid()
}

/// Byte-for-byte comparison with the password being confirmed
pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    password.as_bytes() == confirmation.as_bytes()
}

pub fn file_within_limit(size_bytes: u64, max_bytes: u64) -> bool {
    size_bytes <= max_bytes
}

/// "File size must be less than 10MB" for the default limit
pub fn file_too_large_message(max_bytes: u64) -> String {
    let mib = max_bytes / (1024 * 1024);
    if mib > 0 && mib * 1024 * 1024 == max_bytes {
        format!("File size must be less than {}MB", mib)
    } else {
        format!("File size must be at most {} bytes", max_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("jane.doe@hospital.co.ke"));
        assert!(is_valid_email("JANE+neuro@Example.ORG"));
        assert!(!is_valid_email("jane@hospital"));
        assert!(!is_valid_email("jane hospital.org"));
        assert!(!is_valid_email("@hospital.org"));
        assert!(!is_valid_email("jane@hospital.c"));
    }

    #[test]
    fn test_email_rejects_non_ascii_case_folds() {
        assert!(!is_valid_email("\u{17F}@example.org"));
        assert!(!is_valid_email("a@example.\u{212A}E"));
        assert!(!is_valid_email("jos\u{E9}@example.org"));
    }

    #[test]
    fn test_phone_pattern() {
        assert!(is_valid_phone("+254 712 345 678"));
        assert!(is_valid_phone("0712-345-678"));
        assert!(is_valid_phone("0712345678"));
        assert!(!is_valid_phone("071234567"));
        assert!(!is_valid_phone("+254 712 345 678 90"));
        assert!(!is_valid_phone("(0712) 345678"));
        assert!(!is_valid_phone("++254712345678"));
    }

    #[test]
    fn test_password_match_is_exact() {
        assert!(passwords_match("Abcdef1!", "Abcdef1!"));
        assert!(!passwords_match("Abcdef1!", "Abcdef1"));
        assert!(!passwords_match("Abcdef1!", "abcdef1!"));
    }

    #[test]
    fn test_file_limit_is_inclusive() {
        assert!(file_within_limit(DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_MAX_UPLOAD_BYTES));
        assert!(!file_within_limit(DEFAULT_MAX_UPLOAD_BYTES + 1, DEFAULT_MAX_UPLOAD_BYTES));
    }

    #[test]
    fn test_file_message() {
        assert_eq!(
            file_too_large_message(DEFAULT_MAX_UPLOAD_BYTES),
            "File size must be less than 10MB"
        );
        assert_eq!(file_too_large_message(1000), "File size must be at most 1000 bytes");
    }
}
