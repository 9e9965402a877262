//! Interactive wizard
//!
//! Prompts for each field of the current step, advances when the step is
//! valid and finally submits, all through a [`Prompter`] so the same flow
//! runs against a terminal or a scripted list of answers.

mod input;
mod prompter;
mod runner;

pub use input::{parse_command, parse_value, parse_yes_no, Command};
pub use prompter::{Prompter, ScriptedPrompter, TerminalPrompter};
pub use runner::{Wizard, WizardOutcome};
