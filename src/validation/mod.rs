//! Validation primitives
//!
//! Password strength facets and the format rules applied to each field class.

pub mod password;
pub mod rules;

pub use password::{Facet, PasswordStrength};
pub use rules::{
    file_too_large_message, file_within_limit, is_strong_password, is_valid_email,
    is_valid_phone, passwords_match, DEFAULT_MAX_UPLOAD_BYTES,
};
