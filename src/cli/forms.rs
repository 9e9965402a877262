//! Form catalog commands
//!
//! Lists and outlines forms, and resolves a form name to a definition:
//! an explicit definition file, a built-in form, or a file in the forms
//! directory.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::{Settings, StepformPaths};
use crate::display::{format_catalog, format_form_outline};
use crate::error::{FormError, FormResult};
use crate::form::FormDefinition;
use crate::forms;

const DEFINITION_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

fn is_definition_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DEFINITION_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}

/// Definitions found in the forms directory; unreadable files are skipped
pub fn custom_definitions(paths: &StepformPaths) -> Vec<FormDefinition> {
    let Ok(entries) = std::fs::read_dir(paths.forms_dir()) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_definition_file(p))
        .collect();
    files.sort();

    files
        .into_iter()
        .filter_map(|path| match FormDefinition::load(&path) {
            Ok(definition) => Some(definition),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping form definition");
                None
            }
        })
        .collect()
}

/// Find the definition to run for `name`
///
/// `definition_file` wins when given. Otherwise built-in forms are tried
/// first, then `<forms_dir>/<name>.{yaml,yml,json}`. File fields without
/// their own limit get `settings.max_upload_bytes`.
pub fn resolve_definition(
    name: &str,
    definition_file: Option<&Path>,
    paths: &StepformPaths,
    settings: &Settings,
) -> FormResult<FormDefinition> {
    let definition = if let Some(file) = definition_file {
        FormDefinition::load(file)?
    } else {
        match forms::builtin(name) {
            Ok(definition) => definition,
            Err(FormError::UnknownForm(_)) => {
                let candidate = DEFINITION_EXTENSIONS
                    .iter()
                    .map(|ext| paths.forms_dir().join(format!("{}.{}", name, ext)))
                    .find(|p| p.is_file())
                    .ok_or_else(|| FormError::UnknownForm(name.to_string()))?;
                FormDefinition::load(candidate)?
            }
            Err(e) => return Err(e),
        }
    };

    Ok(definition.with_default_upload_limit(settings.max_upload_bytes))
}

/// List built-in and custom forms
pub fn handle_forms_command(paths: &StepformPaths) -> FormResult<()> {
    let mut catalog = forms::catalog();
    catalog.extend(custom_definitions(paths));

    println!("{}", format_catalog(&catalog));
    Ok(())
}

/// Print the steps and fields of one form
pub fn handle_show_command(
    name: &str,
    definition_file: Option<&Path>,
    paths: &StepformPaths,
    settings: &Settings,
) -> FormResult<()> {
    let definition = resolve_definition(name, definition_file, paths, settings)?;
    print!("{}", format_form_outline(&definition));
    Ok(())
}
