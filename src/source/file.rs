//! File-based status source.
//!
//! Reads the current status from a small JSON file, e.g.
//! `{"status": "passed"}`. Useful for demos and integration tests where
//! no CI provider is reachable; whatever writes the file plays the role
//! of the provider.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{SourceError, StatusSource};
use crate::status::Status;

#[derive(Debug, Deserialize)]
struct StatusFile {
    status: Status,
}

/// A status source that reads a JSON file on every poll.
///
/// The monitor deduplicates unchanged values, so re-reading an unchanged
/// file is harmless. A missing or malformed file is an error, never a
/// stale status.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatusSource for FileSource {
    fn current_status(&mut self) -> Result<Status, SourceError> {
        let content = fs::read_to_string(&self.path)?;
        let parsed: StatusFile =
            serde_json::from_str(&content).map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(parsed.status)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/status.json");
        assert_eq!(source.path(), Path::new("/tmp/status.json"));
        assert_eq!(source.description(), "file: /tmp/status.json");
    }

    #[test]
    fn test_file_source_reads_status() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"status": "passed"}}"#).unwrap();

        let mut source = FileSource::new(file.path());
        assert_eq!(source.current_status().unwrap(), Status::Passed);

        // Unchanged file reads the same value again
        assert_eq!(source.current_status().unwrap(), Status::Passed);
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/status.json");
        let err = source.current_status().unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());
        let err = source.current_status().unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_file_source_unknown_tag() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"status": "cancelled"}}"#).unwrap();

        let mut source = FileSource::new(file.path());
        let err = source.current_status().unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }
}
