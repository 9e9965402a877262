//! `init` and `config` commands

use crate::config::{Settings, StepformPaths};
use crate::error::FormResult;
use crate::forms;

/// Create the data directory and write the settings file
pub fn handle_init_command(paths: &StepformPaths, settings: &Settings) -> FormResult<()> {
    println!("Initializing stepform at: {}", paths.base_dir().display());

    paths.ensure_directories()?;
    std::fs::create_dir_all(paths.forms_dir())?;
    settings.save(paths)?;

    println!("Initialization complete!");
    println!();
    println!("Built-in forms:");
    for form in forms::catalog() {
        println!("  - {} ({})", form.name, form.title);
    }
    println!();
    println!(
        "Custom definitions (YAML or JSON) placed in {} can be filled by name.",
        paths.forms_dir().display()
    );
    println!("Run 'stepform fill' to start a registration.");
    Ok(())
}

/// Show paths and effective settings
pub fn handle_config_command(paths: &StepformPaths, settings: &Settings) -> FormResult<()> {
    println!("stepform Configuration");
    println!("======================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Submissions file: {}", paths.submissions_file().display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!("Forms directory:  {}", paths.forms_dir().display());
    println!("Initialized:      {}", if paths.is_initialized() { "yes" } else { "no" });
    println!();
    println!("Settings:");
    println!("  Default form:        {}", settings.default_form);
    println!("  Submission delay:    {} ms", settings.submission_delay_ms);
    println!("  Max upload size:     {} bytes", settings.max_upload_bytes);
    println!("  Store submissions:   {}", settings.store_submissions);
    println!("  Hash secrets:        {}", settings.hash_secrets);
    println!("  Audit enabled:       {}", settings.audit_enabled);
    Ok(())
}
