//! User settings for stepform
//!
//! Controls how the command-line host submits forms: simulated delay,
//! whether submissions are stored, secret hashing and audit logging.

use serde::{Deserialize, Serialize};

use super::paths::StepformPaths;
use crate::error::FormError;
use crate::storage::write_json_atomic;
use crate::validation::DEFAULT_MAX_UPLOAD_BYTES;

/// User settings for stepform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Delay applied by the simulated submission sink, in milliseconds
    #[serde(default = "default_submission_delay_ms")]
    pub submission_delay_ms: u64,

    /// Upload limit applied to file fields loaded from custom definitions
    /// that do not set their own
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// Append completed submissions to data/submissions.jsonl
    #[serde(default = "default_true")]
    pub store_submissions: bool,

    /// Replace password fields with an Argon2id hash before storing
    #[serde(default = "default_true")]
    pub hash_secrets: bool,

    /// Record session events in audit.log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,

    /// Form used by `stepform fill` when none is named
    #[serde(default = "default_form")]
    pub default_form: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_submission_delay_ms() -> u64 {
    1500
}

fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_true() -> bool {
    true
}

fn default_form() -> String {
    "membership".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            submission_delay_ms: default_submission_delay_ms(),
            max_upload_bytes: default_max_upload_bytes(),
            store_submissions: true,
            hash_secrets: true,
            audit_enabled: true,
            default_form: default_form(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &StepformPaths) -> Result<Self, FormError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FormError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| FormError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &StepformPaths) -> Result<(), FormError> {
        paths.ensure_directories()?;

        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.submission_delay_ms, 1500);
        assert_eq!(settings.max_upload_bytes, 10 * 1024 * 1024);
        assert!(settings.store_submissions);
        assert!(settings.hash_secrets);
        assert_eq!(settings.default_form, "membership");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StepformPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            submission_delay_ms: 0,
            default_form: "directory".into(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.submission_delay_ms, 0);
        assert_eq!(loaded.default_form, "directory");
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"audit_enabled": false}"#).unwrap();
        assert!(!loaded.audit_enabled);
        assert_eq!(loaded.schema_version, 1);
        assert_eq!(loaded.submission_delay_ms, 1500);
    }

    #[test]
    fn test_corrupt_settings_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StepformPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FormError::Config(_)));
    }
}
