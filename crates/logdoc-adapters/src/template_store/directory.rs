//! User template directory, overlaid on another store.
//!
//! A file at `<root>/templates/log_to_Log_java.jinja` replaces the template
//! of the same logical path; anything the directory lacks comes from the
//! fallback (normally the built-in set).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use logdoc_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{RelativeRef, TEMPLATE_ROOT},
    error::LogdocResult,
};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub struct DirectoryTemplateStore {
    root: PathBuf,
    fallback: Option<Arc<dyn TemplateStore>>,
}

impl DirectoryTemplateStore {
    /// `root` is the directory that contains `templates/`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn TemplateStore>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateStore for DirectoryTemplateStore {
    fn load(&self, path: &RelativeRef) -> LogdocResult<Option<String>> {
        let file = path.to_path(&self.root);
        if file.is_file() {
            debug!(template = %path, file = %file.display(), "Using user template");
            return fs::read_to_string(&file)
                .map(Some)
                .map_err(|e| ApplicationError::io(file, "read template", e).into());
        }

        match &self.fallback {
            Some(fallback) => fallback.load(path),
            None => Ok(None),
        }
    }

    fn list(&self) -> LogdocResult<Vec<String>> {
        let mut names = match &self.fallback {
            Some(fallback) => fallback.list()?,
            None => Vec::new(),
        };

        let templates = self.root.join(TEMPLATE_ROOT);
        if templates.is_dir() {
            for entry in WalkDir::new(&templates).min_depth(1) {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        warn!(error = %e, "Skipping unreadable template entry");
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                    continue;
                };
                let name = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                names.push(name);
            }
        }

        names.sort();
        names.dedup();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template_store::EmbeddedTemplateStore;
    use tempfile::TempDir;

    fn user_dir(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (rel, content) in files {
            let path = temp.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        temp
    }

    #[test]
    fn user_template_overrides_builtin() {
        let temp = user_dir(&[("templates/log_to_Log_java.jinja", "custom")]);
        let store =
            DirectoryTemplateStore::new(temp.path()).with_fallback(Arc::new(EmbeddedTemplateStore));

        let log = RelativeRef::parse("templates/log_to_Log_java.jinja").unwrap();
        let header = RelativeRef::parse("templates/_header.jinja").unwrap();
        assert_eq!(store.load(&log).unwrap().as_deref(), Some("custom"));
        assert!(store.load(&header).unwrap().unwrap().contains("generated by logdoc"));
    }

    #[test]
    fn list_merges_user_and_builtin_names() {
        let temp = user_dir(&[
            ("templates/log_to_Log_java.jinja", "custom"),
            ("templates/kotlin/log_to_Log_java.jinja", "kt"),
        ]);
        let store =
            DirectoryTemplateStore::new(temp.path()).with_fallback(Arc::new(EmbeddedTemplateStore));

        let names = store.list().unwrap();
        assert!(names.contains(&"templates/kotlin/log_to_Log_java.jinja".to_string()));
        assert_eq!(
            names
                .iter()
                .filter(|n| *n == "templates/log_to_Log_java.jinja")
                .count(),
            1
        );
    }

    #[test]
    fn without_fallback_missing_is_none() {
        let temp = user_dir(&[]);
        let store = DirectoryTemplateStore::new(temp.path());
        let r = RelativeRef::parse("templates/log_to_Log_java.jinja").unwrap();
        assert_eq!(store.load(&r).unwrap(), None);
        assert!(store.list().unwrap().is_empty());
    }
}
