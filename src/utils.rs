// ABOUTME: Utility functions for the md-slides application
// ABOUTME: File validation and document loading helpers for the CLI

use crate::errors::{Result, SlideError};
use log::info;
use std::path::Path;

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SlideError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(SlideError::ValidationError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Read a markdown document as UTF-8 text
pub fn read_document(path: &Path) -> Result<String> {
    validate_file_exists(path)?;
    info!("Reading markdown document: {:?}", path);
    std::fs::read_to_string(path).map_err(SlideError::FileReadError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_document() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"# Slide").expect("Failed to write to temp file");
        assert_eq!(read_document(file.path()).unwrap(), "# Slide");
    }

    #[test]
    fn test_missing_and_directory_paths() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let missing = dir.path().join("missing.md");
        assert!(matches!(
            read_document(&missing),
            Err(SlideError::PathNotFoundError(_))
        ));
        assert!(matches!(
            validate_file_exists(dir.path()),
            Err(SlideError::ValidationError(_))
        ));
    }
}
