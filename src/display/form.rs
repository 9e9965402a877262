//! Form and session display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::MASK;
use crate::form::{FieldSpec, FormDefinition, FormSession, StepStatus};

#[derive(Tabled)]
struct CatalogRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Steps")]
    steps: usize,
    #[tabled(rename = "Fields")]
    fields: usize,
}

/// Format the list of available forms as a table
pub fn format_catalog(forms: &[FormDefinition]) -> String {
    if forms.is_empty() {
        return "No forms available.".to_string();
    }

    let rows = forms.iter().map(|f| CatalogRow {
        name: f.name.clone(),
        title: f.title.clone(),
        steps: f.total_steps(),
        fields: f.fields().count(),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

fn requirement_marker(field: &FieldSpec) -> String {
    if field.required {
        "required".to_string()
    } else if let Some(dep) = &field.required_when {
        format!("required depending on {}", dep.field())
    } else {
        "optional".to_string()
    }
}

/// Format every step of a form with its fields
pub fn format_form_outline(definition: &FormDefinition) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} ({})\n", definition.title, definition.name));
    if !definition.description.is_empty() {
        output.push_str(&format!("{}\n", definition.description));
    }

    for (i, step) in definition.steps.iter().enumerate() {
        output.push_str(&format!("\nStep {}: {}\n", i + 1, step.title));

        let label_width = step
            .fields
            .iter()
            .map(|f| f.label.len())
            .max()
            .unwrap_or(5)
            .max(5);

        for field in &step.fields {
            output.push_str(&format!(
                "  {:<label_width$}  {:<18}  {}\n",
                field.label,
                field.kind.name(),
                requirement_marker(field),
                label_width = label_width,
            ));
            if let Some(options) = field.kind.options() {
                let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                output.push_str(&format!(
                    "  {:<label_width$}  options: {}\n",
                    "",
                    values.join(", "),
                    label_width = label_width,
                ));
            }
        }
    }

    output
}

/// Format the step indicator, e.g. `[x] Personal  [>] Professional  [ ] Payment`
pub fn format_progress(session: &FormSession) -> String {
    session
        .progress()
        .into_iter()
        .map(|(_, step, status)| {
            let mark = match status {
                StepStatus::Done => "x",
                StepStatus::Current => ">",
                StepStatus::Upcoming => " ",
            };
            format!("[{}] {}", mark, step.title)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Format the heading printed when a step is entered
pub fn format_step_header(session: &FormSession) -> String {
    let step = session.current_step_definition();
    let title = format!(
        "Step {} of {}: {}",
        session.current_step(),
        session.total_steps(),
        step.title
    );

    format!(
        "{}\n{}\n{}\n",
        format_progress(session),
        title,
        "=".repeat(title.len())
    )
}

/// Format numbered options for a choice field
pub fn format_choices(field: &FieldSpec) -> String {
    let Some(options) = field.kind.options() else {
        return String::new();
    };

    options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("  {}. {} ({})\n", i + 1, o.label, o.value))
        .collect()
}

/// Format the prompt for one field, including its current value
pub fn format_field_prompt(field: &FieldSpec, session: &FormSession) -> String {
    let mut prompt = field.label.clone();
    if field.is_mandatory(session.fields()) {
        prompt.push_str(" *");
    }

    let hint = match &field.kind {
        crate::form::FieldKind::Consent => Some("yes/no"),
        crate::form::FieldKind::MultiChoice { .. } => Some("comma-separated"),
        crate::form::FieldKind::File { .. } => Some("path"),
        _ => None,
    };
    if let Some(hint) = hint {
        prompt.push_str(&format!(" ({})", hint));
    }

    if let Some(current) = session.field(&field.name) {
        if !current.is_blank() {
            let shown = if field.kind.is_secret() {
                MASK.to_string()
            } else {
                current.to_string()
            };
            prompt.push_str(&format!(" [{}]", shown));
        }
    }

    prompt.push_str(": ");
    prompt
}

/// Format all entered values, step by step, for the final confirmation
pub fn format_review(session: &FormSession) -> String {
    let mut output = String::new();

    for step in &session.definition().steps {
        output.push_str(&format!("{}\n", step.title));
        for field in &step.fields {
            let Some(value) = session.field(&field.name).filter(|v| !v.is_blank()) else {
                continue;
            };
            let shown = if field.kind.is_secret() {
                MASK.to_string()
            } else {
                value.to_string()
            };
            output.push_str(&format!("  {}: {}\n", field.label, shown));
        }
    }

    output
}
