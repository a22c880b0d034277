//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use logdoc_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{LogdocError, LogdocResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_readable(&self, path: &Path) -> bool {
        std::fs::read_dir(path).is_ok()
    }

    fn is_writable(&self, path: &Path) -> bool {
        std::fs::metadata(path)
            .map(|m| m.is_dir() && !m.permissions().readonly())
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> LogdocResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn read_to_string(&self, path: &Path) -> LogdocResult<String> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::NotFound {
                path: path.to_path_buf(),
            }
            .into(),
            io::ErrorKind::InvalidData => ApplicationError::Parse {
                document: path.display().to_string(),
                reason: "not valid UTF-8".into(),
            }
            .into(),
            _ => map_io_error(path, e, "read file"),
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> LogdocResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &'static str) -> LogdocError {
    ApplicationError::io(path, operation, e).into()
}
