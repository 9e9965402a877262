//! Display formatting for terminal output
//!
//! Formats form definitions, sessions, validation feedback and stored
//! submissions as plain strings; callers decide where to print them.

pub mod feedback;
pub mod form;
pub mod submission;

pub use feedback::{format_blocked, format_check_report, format_strength};
pub use form::{
    format_catalog, format_choices, format_field_prompt, format_form_outline, format_progress,
    format_review, format_step_header,
};
pub use submission::{format_submission_details, format_submission_list};

/// Placeholder shown instead of secret values
pub const MASK: &str = "********";
