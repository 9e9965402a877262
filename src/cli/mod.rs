//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the form engine, sinks and storage.

pub mod check;
pub mod fill;
pub mod forms;
pub mod password;
pub mod setup;
pub mod submissions;

pub use check::{handle_check_command, CheckArgs};
pub use fill::{handle_fill_command, FillArgs};
pub use forms::{handle_forms_command, handle_show_command, resolve_definition};
pub use password::handle_password_command;
pub use setup::{handle_config_command, handle_init_command};
pub use submissions::handle_submissions_command;

use crate::audit::AuditLogger;
use crate::config::{Settings, StepformPaths};

/// Audit logger honouring the `audit_enabled` setting
pub fn audit_logger(paths: &StepformPaths, settings: &Settings) -> AuditLogger {
    if settings.audit_enabled {
        AuditLogger::new(paths.audit_log())
    } else {
        AuditLogger::disabled(paths.audit_log())
    }
}
