//! Resolver - one resolution authority per base directory.
//!
//! Input documents and template includes share the same relative-reference
//! rules, so a template can never read outside the directory the
//! definition was loaded from.
//!
//! Documents the definition loader has already parsed are retained and
//! handed to templates as-is; only other inputs are read from disk.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use crate::{
    application::ports::{ContentResolver, Filesystem, MarkupParser, TemplateStore},
    domain::{RelativeRef, XmlDocument},
    error::LogdocResult,
};

#[derive(Clone)]
pub struct Resolver {
    base_dir: PathBuf,
    filesystem: Arc<dyn Filesystem>,
    parser: Arc<dyn MarkupParser>,
    templates: Arc<dyn TemplateStore>,
    retained: BTreeMap<String, XmlDocument>,
}

impl Resolver {
    pub fn new(
        base_dir: impl Into<PathBuf>,
        filesystem: Arc<dyn Filesystem>,
        parser: Arc<dyn MarkupParser>,
        templates: Arc<dyn TemplateStore>,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            filesystem,
            parser,
            templates,
            retained: BTreeMap::new(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Read and parse `name` from the base directory.
    ///
    /// No schema validation happens here; that is the caller's job.
    ///
    /// # Errors
    ///
    /// - `InvalidReference` if `name` would leave the base directory
    /// - `NotFound` if the file is absent
    /// - `Parse` if the markup is malformed
    #[instrument(skip(self), fields(base = %self.base_dir.display()))]
    pub fn load_input_document(&self, name: &str) -> LogdocResult<XmlDocument> {
        let reference = RelativeRef::parse(name)?;
        let path = reference.to_path(&self.base_dir);
        let text = self.filesystem.read_to_string(&path)?;
        let document = self.parser.parse(reference.as_str(), &text)?;
        debug!(document = %reference, root = document.root().name(), "Loaded input document");
        Ok(document)
    }

    /// Keep a parsed document so later template lookups of the same name
    /// reuse it instead of reading the file again.
    pub fn retain(&mut self, document: XmlDocument) {
        self.retained.insert(document.name().to_string(), document);
    }
}

impl ContentResolver for Resolver {
    fn resolve_template(&self, reference: &str) -> LogdocResult<Option<String>> {
        let reference = RelativeRef::parse(reference)?;

        if let Some(source) = self.templates.load(&reference)? {
            trace!(template = %reference, "Resolved from template store");
            return Ok(Some(source));
        }

        let path = reference.to_path(&self.base_dir);
        if self.filesystem.exists(&path) && !self.filesystem.is_dir(&path) {
            trace!(template = %reference, "Resolved from base directory");
            return self.filesystem.read_to_string(&path).map(Some);
        }

        Ok(None)
    }

    fn load_document(&self, reference: &str) -> LogdocResult<XmlDocument> {
        let reference = RelativeRef::parse(reference)?;
        if let Some(document) = self.retained.get(reference.as_str()) {
            trace!(document = %reference, "Reusing parsed document");
            return Ok(document.clone());
        }
        self.load_input_document(reference.as_str())
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("base_dir", &self.base_dir)
            .field("retained", &self.retained.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
