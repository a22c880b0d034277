//! Generator - main application orchestrator.
//!
//! This service coordinates one generation run:
//! 1. Validate source and destination directories
//! 2. Load the definition (see `DefinitionLoader`)
//! 3. Apply one template per artifact (see `Transformer`)
//!
//! A failure at any step ends the run. Artifacts written before the failure
//! are left in place.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{ContentResolver, Filesystem, MarkupParser, TemplateEngine, TemplateStore},
        services::{
            definition_loader::{DefinitionLoader, LoadOptions, LoadedDefinition},
            transformer::Transformer,
        },
    },
    domain::{AccessLevel, DomainName, Locale, SchemaSet, Target},
    error::LogdocResult,
};

/// Per-run generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Alternative template set for the log class.
    pub target: Option<Target>,
    /// Validate inputs against the schemas.
    pub strict: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            target: None,
            strict: true,
        }
    }
}

impl GenerateOptions {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strict: self.strict,
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub domain: DomainName,
    pub access_level: AccessLevel,
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    /// Written files, in generation order.
    pub files: Vec<PathBuf>,
    pub locales: Vec<Locale>,
    pub groups: usize,
    pub entries: usize,
    pub elapsed: Duration,
}

/// Main generation service.
pub struct Generator {
    filesystem: Arc<dyn Filesystem>,
    loader: DefinitionLoader,
    transformer: Transformer,
}

impl Generator {
    /// Create a new generator with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use logdoc_core::application::{GenerateOptions, Generator};
    ///
    /// let generator = Generator::new(
    ///     Arc::new(filesystem), // impl Filesystem
    ///     Arc::new(parser),     // impl MarkupParser
    ///     Arc::new(templates),  // impl TemplateStore
    ///     Arc::new(engine),     // impl TemplateEngine
    ///     Arc::new(schemas),    // SchemaSet, loaded once at start-up
    /// );
    /// let report = generator.generate("defs".as_ref(), None, &GenerateOptions::default())?;
    /// ```
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        parser: Arc<dyn MarkupParser>,
        templates: Arc<dyn TemplateStore>,
        engine: Arc<dyn TemplateEngine>,
        schemas: Arc<SchemaSet>,
    ) -> Self {
        Self {
            loader: DefinitionLoader::new(Arc::clone(&filesystem), parser, templates, schemas),
            transformer: Transformer::new(Arc::clone(&filesystem), engine),
            filesystem,
        }
    }

    /// Load and validate the definition in `source_dir` without writing
    /// anything.
    #[instrument(skip_all, fields(source = %source_dir.display(), strict = options.strict))]
    pub fn check(&self, source_dir: &Path, options: LoadOptions) -> LogdocResult<LoadedDefinition> {
        self.validate_source_dir(source_dir)?;
        self.loader.load(source_dir, options)
    }

    /// Generate every artifact for the definition in `source_dir`.
    ///
    /// Output goes to `dest_dir/<domain as path>/`; `dest_dir` defaults to
    /// `source_dir`. Loading errors propagate unchanged.
    #[instrument(
        skip_all,
        fields(
            source = %source_dir.display(),
            dest = ?dest_dir.map(Path::display),
            target = ?options.target,
            strict = options.strict,
        )
    )]
    pub fn generate(
        &self,
        source_dir: &Path,
        dest_dir: Option<&Path>,
        options: &GenerateOptions,
    ) -> LogdocResult<GenerationReport> {
        let started = Instant::now();
        let dest_dir = dest_dir.unwrap_or(source_dir);

        info!(
            "Generating from {} into {}",
            source_dir.display(),
            dest_dir.display()
        );

        self.validate_source_dir(source_dir)?;
        self.validate_dest_dir(dest_dir)?;

        let loaded = self.loader.load(source_dir, options.load_options())?;
        let def = loaded.definition();
        let resolver: Arc<dyn ContentResolver> = loaded.resolver();
        let output_dir = dest_dir.join(def.domain_name().to_path());

        let mut files = Vec::new();
        for artifact in def.plan_artifacts(options.target.as_ref()) {
            let source = match artifact.kind().source_locale() {
                Some(locale) => def.translation_bundle(locale).ok_or_else(|| {
                    ApplicationError::NotFound {
                        path: source_dir.join(locale.bundle_file_name()),
                    }
                })?,
                None => def.source(),
            };

            debug!(
                template = artifact.template(),
                source = source.name(),
                "Planned artifact"
            );

            let path = self.transformer.apply_template(
                source,
                artifact.template(),
                &output_dir,
                artifact.output_file(),
                artifact.params(),
                Arc::clone(&resolver),
            )?;
            info!(file = %path.display(), "Generated");
            files.push(path);
        }

        let elapsed = started.elapsed();
        info!(
            files = files.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Generation completed"
        );

        Ok(GenerationReport {
            domain: def.domain_name().clone(),
            access_level: def.access_level(),
            source_dir: source_dir.to_path_buf(),
            dest_dir: dest_dir.to_path_buf(),
            files,
            locales: def.locales().cloned().collect(),
            groups: def.groups().len(),
            entries: def.entry_count(),
            elapsed,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn validate_source_dir(&self, dir: &Path) -> LogdocResult<()> {
        let reason = if !self.filesystem.exists(dir) {
            Some("does not exist")
        } else if !self.filesystem.is_dir(dir) {
            Some("is not a directory")
        } else if !self.filesystem.is_readable(dir) {
            Some("is not readable")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(directory_error("Source", dir, reason)),
            None => Ok(()),
        }
    }

    /// An existing destination must be a writable directory. A missing one
    /// must be creatable: its nearest existing ancestor has to be a writable
    /// directory. Nothing is created here.
    fn validate_dest_dir(&self, dir: &Path) -> LogdocResult<()> {
        if self.filesystem.exists(dir) {
            if !self.filesystem.is_dir(dir) {
                return Err(directory_error("Destination", dir, "is not a directory"));
            }
            if !self.filesystem.is_writable(dir) {
                return Err(directory_error("Destination", dir, "is not writable"));
            }
            return Ok(());
        }

        let anchor = dir
            .ancestors()
            .skip(1)
            .map(|a| {
                if a.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    a
                }
            })
            .find(|a| self.filesystem.exists(a));

        match anchor {
            Some(a) if self.filesystem.is_dir(a) && self.filesystem.is_writable(a) => Ok(()),
            Some(a) => Err(directory_error(
                "Destination",
                dir,
                &format!("cannot be created under {}", a.display()),
            )),
            None => Err(directory_error("Destination", dir, "cannot be created")),
        }
    }
}

fn directory_error(role: &'static str, path: &Path, reason: &str) -> crate::error::LogdocError {
    ApplicationError::Directory {
        role,
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
    .into()
}
