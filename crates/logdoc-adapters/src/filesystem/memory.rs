//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use logdoc_core::{
    application::{ApplicationError, ports::Filesystem},
    error::LogdocResult,
};

/// In-memory filesystem for testing.
///
/// Directories must be created before files are written into them, like on
/// a real disk. The root `/` always exists.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    read_only: HashSet<PathBuf>,
    reads: HashMap<PathBuf, usize>,
}

impl MemoryFilesystem {
    /// Create a new memory filesystem holding only `/`.
    pub fn new() -> Self {
        let mut inner = MemoryFilesystemInner::default();
        inner.directories.insert(PathBuf::from("/"));
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    /// Add a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> LogdocResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }
        self.write_file(path, content)?;
        Ok(self)
    }

    /// Mark a directory as not writable (testing helper).
    pub fn set_read_only(&self, path: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.insert(path.as_ref().to_path_buf());
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// How many times `read_to_string` was called for `path`.
    pub fn read_count(&self, path: impl AsRef<Path>) -> usize {
        self.inner
            .read()
            .map(|inner| inner.reads.get(path.as_ref()).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let Ok(inner) = self.inner.read() else {
            return Vec::new();
        };
        let mut files: Vec<_> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_readable(&self, path: &Path) -> bool {
        self.is_dir(path)
    }

    fn is_writable(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path) && !inner.read_only.contains(path))
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> LogdocResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.files.contains_key(&current) {
                return Err(ApplicationError::io(
                    path,
                    "create directory",
                    std::io::Error::new(std::io::ErrorKind::AlreadyExists, "a file is in the way"),
                )
                .into());
            }
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> LogdocResult<String> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        *inner.reads.entry(path.to_path_buf()).or_default() += 1;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::NotFound {
                path: path.to_path_buf(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> LogdocResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::io(
                    path,
                    "write file",
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "parent directory does not exist",
                    ),
                )
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/out/Log.java"), "x").is_err());

        fs.create_dir_all(Path::new("/out")).unwrap();
        fs.write_file(Path::new("/out/Log.java"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/out/Log.java")).as_deref(), Some("x"));
    }

    #[test]
    fn reads_are_counted_per_path() {
        let fs = MemoryFilesystem::new().with_file("/defs/log.xml", "<log/>").unwrap();
        assert_eq!(fs.read_count("/defs/log.xml"), 0);

        fs.read_to_string(Path::new("/defs/log.xml")).unwrap();
        fs.read_to_string(Path::new("/defs/log.xml")).unwrap();
        assert!(fs.read_to_string(Path::new("/defs/nope.xml")).is_err());

        assert_eq!(fs.read_count("/defs/log.xml"), 2);
        assert_eq!(fs.read_count("/defs/nope.xml"), 1);
    }

    #[test]
    fn read_only_directories_are_not_writable() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/ro")).unwrap();
        fs.set_read_only("/ro");
        assert!(fs.is_dir(Path::new("/ro")));
        assert!(!fs.is_writable(Path::new("/ro")));
    }
}
