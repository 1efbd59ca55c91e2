//! Source readers
//!
//! The tracer never touches the filesystem directly; it asks a
//! `SourceReader` for each file's text.
//!
//! @module trace/source

use std::io::ErrorKind;
use std::path::Path;

use crate::core::error::{Error, Result};

/// Supplies the raw text of a source file
pub trait SourceReader {
    fn read_source(&self, path: &Path) -> Result<String>;
}

/// Reads UTF-8 files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl SourceReader for FsSource {
    fn read_source(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => Error::MissingFile {
                path: path.to_path_buf(),
            },
            _ => Error::UnreadableFile {
                path: path.to_path_buf(),
                source,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Order.java");
        std::fs::write(&path, "class Order {}").unwrap();

        assert_eq!(FsSource.read_source(&path).unwrap(), "class Order {}");
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = FsSource.read_source(&temp.path().join("Gone.java"));
        assert!(matches!(result, Err(Error::MissingFile { .. })));
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Binary.java");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let result = FsSource.read_source(&path);
        assert!(matches!(result, Err(Error::UnreadableFile { .. })));
    }

    #[test]
    fn test_directory_is_unreadable() {
        let temp = TempDir::new().unwrap();
        let result = FsSource.read_source(temp.path());
        assert!(matches!(result, Err(Error::UnreadableFile { .. })));
    }
}
