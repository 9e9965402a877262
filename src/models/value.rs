//! Field values held by a form session
//!
//! Values are deliberately loose: a text box, a radio group and a select all
//! produce `Text`, checkboxes produce `Bool`, checkbox groups produce
//! `Choices`, and uploads produce `File` metadata.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{FormError, FormResult};

/// Accumulated field values keyed by field name
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Metadata for an uploaded file; the contents never enter the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub name: String,
    pub size_bytes: u64,
}

impl FileAttachment {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Build attachment metadata from a file on disk
    pub fn from_path(path: impl AsRef<Path>) -> FormResult<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)
            .map_err(|e| FormError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        if !metadata.is_file() {
            return Err(FormError::Validation(format!(
                "{} is not a file",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, metadata.len()))
    }
}

/// Current value of one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
    Choices(BTreeSet<String>),
    File(FileAttachment),
}

impl FieldValue {
    /// Build a checkbox-group value from option names
    pub fn choices<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choices(options.into_iter().map(Into::into).collect())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_choices(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Choices(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileAttachment> {
        match self {
            Self::File(file) => Some(file),
            _ => None,
        }
    }

    /// Whether this value counts as "not filled in"
    ///
    /// Whitespace-only text, an unchecked box and an empty checkbox group are
    /// all blank. An attached file never is.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Bool(b) => !b,
            Self::Choices(set) => set.is_empty(),
            Self::File(_) => false,
        }
    }

    /// Short name of the value shape, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "checkbox",
            Self::Text(_) => "text",
            Self::Choices(_) => "choice list",
            Self::File(_) => "file",
        }
    }
}

impl Zeroize for FieldValue {
    fn zeroize(&mut self) {
        match self {
            Self::Text(s) => s.zeroize(),
            Self::Choices(set) => {
                let mut drained: Vec<String> = std::mem::take(set).into_iter().collect();
                drained.iter_mut().for_each(Zeroize::zeroize);
            }
            Self::File(file) => {
                file.name.zeroize();
                file.size_bytes = 0;
            }
            Self::Bool(b) => *b = false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Bool(true) => write!(f, "yes"),
            Self::Bool(false) => write!(f, "no"),
            Self::Choices(set) => {
                let joined: Vec<&str> = set.iter().map(String::as_str).collect();
                write!(f, "{}", joined.join(", "))
            }
            Self::File(file) => write!(f, "{} ({} bytes)", file.name, file.size_bytes),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<FileAttachment> for FieldValue {
    fn from(file: FileAttachment) -> Self {
        Self::File(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::from("   ").is_blank());
        assert!(!FieldValue::from(" Ada ").is_blank());
        assert!(FieldValue::from(false).is_blank());
        assert!(!FieldValue::from(true).is_blank());
        assert!(FieldValue::Choices(BTreeSet::new()).is_blank());
        assert!(!FieldValue::File(FileAttachment::new("a.png", 0)).is_blank());
    }

    #[test]
    fn test_untagged_deserialization() {
        let map: FieldMap = serde_json::from_str(
            r#"{
                "firstName": "Ada",
                "acceptTerms": true,
                "languages": ["english", "other"],
                "photo": {"name": "me.jpg", "size_bytes": 2048}
            }"#,
        )
        .unwrap();

        assert_eq!(map["firstName"], FieldValue::from("Ada"));
        assert_eq!(map["acceptTerms"], FieldValue::Bool(true));
        assert_eq!(map["languages"], FieldValue::choices(["english", "other"]));
        assert_eq!(map["photo"].as_file().unwrap().size_bytes, 2048);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::choices(["swahili", "english"]).to_string(), "english, swahili");
        assert_eq!(FieldValue::Bool(true).to_string(), "yes");
        assert_eq!(
            FieldValue::from(FileAttachment::new("cv.pdf", 10)).to_string(),
            "cv.pdf (10 bytes)"
        );
    }

    #[test]
    fn test_zeroize_clears_text() {
        let mut value = FieldValue::from("Abcdef1!");
        value.zeroize();
        assert_eq!(value, FieldValue::Text(String::new()));
    }

    #[test]
    fn test_attachment_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.jpg");
        std::fs::write(&path, vec![0u8; 300]).unwrap();

        let file = FileAttachment::from_path(&path).unwrap();
        assert_eq!(file.name, "photo.jpg");
        assert_eq!(file.size_bytes, 300);

        assert!(FileAttachment::from_path(temp_dir.path()).is_err());
    }
}
