//! Built-in form catalog
//!
//! The association ships two multi-step forms. Custom forms can be loaded
//! from JSON or YAML with [`FormDefinition::load`].

pub mod directory;
pub mod membership;

use crate::error::{FormError, FormResult};
use crate::form::definition::FormDefinition;

pub fn membership() -> FormDefinition {
    membership::definition()
}

pub fn directory() -> FormDefinition {
    directory::definition()
}

/// Every built-in form, in display order
pub fn catalog() -> Vec<FormDefinition> {
    vec![membership(), directory()]
}

/// Look up a built-in form by name
pub fn builtin(name: &str) -> FormResult<FormDefinition> {
    catalog()
        .into_iter()
        .find(|form| form.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| FormError::UnknownForm(name.to_string()))
}
