//! Password strength facets
//!
//! A password is acceptable only when all five facets hold. The result is a
//! pure function of the password string and is recomputed on every edit.

use serde::Serialize;

/// Minimum number of characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that satisfy the symbol facet
pub const PASSWORD_SYMBOLS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

/// One independently checked strength condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    Symbol,
}

impl Facet {
    pub const ALL: [Facet; 5] = [
        Facet::MinLength,
        Facet::Uppercase,
        Facet::Lowercase,
        Facet::Digit,
        Facet::Symbol,
    ];

    /// Checklist wording shown under a password box
    pub fn description(self) -> &'static str {
        match self {
            Facet::MinLength => "At least 8 characters",
            Facet::Uppercase => "At least one uppercase letter",
            Facet::Lowercase => "At least one lowercase letter",
            Facet::Digit => "At least one number",
            Facet::Symbol => "At least one special character",
        }
    }
}

/// Strength projection of one password value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PasswordStrength {
    pub min_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
}

impl PasswordStrength {
    /// Evaluate all five facets of `password`
    pub fn evaluate(password: &str) -> Self {
        Self {
            min_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
            has_symbol: password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)),
        }
    }

    /// All five facets hold
    pub fn is_valid(&self) -> bool {
        self.min_length && self.has_uppercase && self.has_lowercase && self.has_digit && self.has_symbol
    }

    pub fn facet(&self, facet: Facet) -> bool {
        match facet {
            Facet::MinLength => self.min_length,
            Facet::Uppercase => self.has_uppercase,
            Facet::Lowercase => self.has_lowercase,
            Facet::Digit => self.has_digit,
            Facet::Symbol => self.has_symbol,
        }
    }

    /// Facets in checklist order with their current state
    pub fn facets(&self) -> impl Iterator<Item = (Facet, bool)> + '_ {
        Facet::ALL.into_iter().map(move |f| (f, self.facet(f)))
    }

    /// Facets that do not hold yet
    pub fn missing(&self) -> Vec<Facet> {
        self.facets().filter(|(_, ok)| !ok).map(|(f, _)| f).collect()
    }
}
