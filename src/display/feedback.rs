//! Validation feedback formatting

use crate::error::StepBlocked;
use crate::form::FormDefinition;
use crate::validation::PasswordStrength;

/// Format the errors that kept a step from being left
pub fn format_blocked(blocked: &StepBlocked, definition: &FormDefinition) -> String {
    let mut output = String::new();

    let title = definition
        .step(blocked.step)
        .map(|s| s.title.as_str())
        .unwrap_or("?");
    output.push_str(&format!(
        "Step {} ({}) has {} problem(s):\n",
        blocked.step,
        title,
        blocked.errors.len()
    ));

    for error in &blocked.errors {
        output.push_str(&format!("  - {}: {}\n", error.field, error.message));
    }

    output
}

/// Format the password checklist, one facet per line
pub fn format_strength(strength: &PasswordStrength) -> String {
    let mut output = String::new();

    for (facet, met) in strength.facets() {
        let mark = if met { "[x]" } else { "[ ]" };
        output.push_str(&format!("  {} {}\n", mark, facet.description()));
    }

    output.push_str(if strength.is_valid() {
        "  Password meets all requirements\n"
    } else {
        "  Password does not meet requirements\n"
    });

    output
}

/// Format the result of validating every step of a form
pub fn format_check_report(definition: &FormDefinition, results: &[StepBlocked]) -> String {
    if results.is_empty() {
        return format!(
            "All {} step(s) of '{}' are valid.\n",
            definition.total_steps(),
            definition.name
        );
    }

    results
        .iter()
        .map(|blocked| format_blocked(blocked, definition))
        .collect::<Vec<_>>()
        .join("\n")
}
