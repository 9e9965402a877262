//! Configuration module for stepform
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::StepformPaths;
pub use settings::Settings;
