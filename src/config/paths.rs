//! Path management for stepform
//!
//! ## Path Resolution Order
//!
//! 1. `STEPFORM_DATA_DIR` environment variable (if set)
//! 2. `$XDG_CONFIG_HOME/stepform` (if set)
//! 3. The platform config directory reported by `directories`
//!    (`~/.config/stepform`, `%APPDATA%\stepform`, ...)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::FormError;

/// Manages all paths used by stepform
#[derive(Debug, Clone)]
pub struct StepformPaths {
    /// Base directory for all stepform data
    base_dir: PathBuf,
}

impl StepformPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, FormError> {
        let base_dir = if let Ok(custom) = std::env::var("STEPFORM_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create StepformPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the stored submissions (one JSON object per line)
    pub fn submissions_file(&self) -> PathBuf {
        self.data_dir().join("submissions.jsonl")
    }

    /// Directory searched for custom form definitions
    pub fn forms_dir(&self) -> PathBuf {
        self.base_dir.join("forms")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), FormError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FormError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FormError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if stepform has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FormError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("stepform"));
    }

    let dirs = BaseDirs::new()
        .ok_or_else(|| FormError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("stepform"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StepformPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.forms_dir(), temp_dir.path().join("forms"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var("STEPFORM_DATA_DIR", custom_path);

        let paths = StepformPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var("STEPFORM_DATA_DIR");
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StepformPaths::with_base_dir(temp_dir.path().join("nested"));

        assert!(!paths.is_initialized());
        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StepformPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert_eq!(
            paths.submissions_file(),
            temp_dir.path().join("data").join("submissions.jsonl")
        );
    }
}
