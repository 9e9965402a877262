//! File I/O utilities
//!
//! Atomic JSON writes for whole documents and append/read helpers for
//! line-delimited JSON (JSONL) logs.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FormError;

fn ensure_parent(path: &Path) -> Result<(), FormError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FormError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FormError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    ensure_parent(path)?;

    // Temp file in the same directory so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| FormError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| FormError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| FormError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| FormError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FormError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Append records as JSON lines, flushing once at the end
pub fn append_jsonl<T, P>(path: P, records: &[T]) -> Result<(), FormError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    if records.is_empty() {
        return Ok(());
    }

    let path = path.as_ref();
    ensure_parent(path)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| FormError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    for record in records {
        let json = serde_json::to_string(record)
            .map_err(|e| FormError::Json(format!("Failed to serialize record: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| FormError::Io(format!("Failed to write record: {}", e)))?;
    }

    file.flush()
        .map_err(|e| FormError::Io(format!("Failed to flush {}: {}", path.display(), e)))?;

    Ok(())
}

/// Read every record of a JSONL file, oldest first
///
/// A missing file reads as empty. Blank lines are skipped.
pub fn read_jsonl<T, P>(path: P) -> Result<Vec<T>, FormError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| FormError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut records = Vec::new();
    for (line_num, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| {
            FormError::Io(format!("Failed to read line {}: {}", line_num + 1, e))
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let record = serde_json::from_str(&line).map_err(|e| {
            FormError::Storage(format!(
                "Failed to parse line {} of {}: {}",
                line_num + 1,
                path.display(),
                e
            ))
        })?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Row {
        n: u32,
    }

    #[test]
    fn test_write_json_atomic_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b.json");

        write_json_atomic(&path, &Row { n: 7 }).unwrap();

        let back: Row = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, Row { n: 7 });
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_jsonl_append_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("log.jsonl");

        assert!(read_jsonl::<Row, _>(&path).unwrap().is_empty());

        append_jsonl(&path, &[Row { n: 1 }]).unwrap();
        append_jsonl(&path, &[Row { n: 2 }, Row { n: 3 }]).unwrap();
        append_jsonl::<Row, _>(&path, &[]).unwrap();

        let rows: Vec<Row> = read_jsonl(&path).unwrap();
        assert_eq!(rows, vec![Row { n: 1 }, Row { n: 2 }, Row { n: 3 }]);
    }

    #[test]
    fn test_corrupt_line_reports_position() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("log.jsonl");
        fs::write(&path, "{\"n\":1}\n\nnot json\n").unwrap();

        let err = read_jsonl::<Row, _>(&path).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }
}
