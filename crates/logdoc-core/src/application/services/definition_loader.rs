//! Definition loading - builds a validated `LogDef` from one directory.
//!
//! The steps run in a fixed order and stop at the first failure, so a
//! caller either gets a complete definition or an error, never a partial
//! one.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, MarkupParser, TemplateStore},
        services::resolver::Resolver,
    },
    domain::{DomainValidator, LogDef, SchemaSet, XmlDocument, entities::log_def::tags},
    error::LogdocResult,
};

/// The root definition file inside a definition directory.
pub const LOG_FILE: &str = "log.xml";

/// How a definition is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Validate `log.xml` and every bundle against their schemas.
    pub strict: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl LoadOptions {
    pub const fn lenient() -> Self {
        Self { strict: false }
    }
}

/// A definition together with the resolver it was loaded through.
///
/// The resolver stays alive for template lookups while the definition's
/// artifacts are generated.
#[derive(Debug, Clone)]
pub struct LoadedDefinition {
    definition: LogDef,
    resolver: Arc<Resolver>,
}

impl LoadedDefinition {
    pub fn definition(&self) -> &LogDef {
        &self.definition
    }

    pub fn resolver(&self) -> Arc<Resolver> {
        Arc::clone(&self.resolver)
    }
}

pub struct DefinitionLoader {
    filesystem: Arc<dyn Filesystem>,
    parser: Arc<dyn MarkupParser>,
    templates: Arc<dyn TemplateStore>,
    schemas: Arc<SchemaSet>,
}

impl DefinitionLoader {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        parser: Arc<dyn MarkupParser>,
        templates: Arc<dyn TemplateStore>,
        schemas: Arc<SchemaSet>,
    ) -> Self {
        Self {
            filesystem,
            parser,
            templates,
            schemas,
        }
    }

    /// Load the definition in `dir`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `dir` is not an existing directory
    /// - `NotFound` / `Parse` from the resolver, for `log.xml` or a bundle
    /// - `SchemaViolation` in strict mode, `UnexpectedRoot` in every mode
    /// - `InvalidDomainName`, `InvalidLocale`, `DuplicateLocale`
    #[instrument(skip_all, fields(dir = %dir.display(), strict = options.strict))]
    pub fn load(&self, dir: &Path, options: LoadOptions) -> LogdocResult<LoadedDefinition> {
        if dir.as_os_str().is_empty() || !self.filesystem.is_dir(dir) {
            return Err(ApplicationError::InvalidArgument {
                message: format!("{} is not an existing directory", dir.display()),
            }
            .into());
        }

        let mut resolver = Resolver::new(
            dir,
            Arc::clone(&self.filesystem),
            Arc::clone(&self.parser),
            Arc::clone(&self.templates),
        );

        let source = resolver.load_input_document(LOG_FILE)?;
        DomainValidator::validate_root(&source, &self.schemas.log().root)?;
        if options.strict {
            DomainValidator::validate_document(self.schemas.log(), &source)?;
        }
        let (domain, access_level) = LogDef::identity(&source)?;
        debug!(%domain, %access_level, "Definition header read");

        let mut bundles: BTreeMap<_, XmlDocument> = BTreeMap::new();
        for locale in LogDef::declared_locales(&source)? {
            let bundle = resolver.load_input_document(&locale.bundle_file_name())?;
            DomainValidator::validate_root(&bundle, tags::TRANSLATION_BUNDLE)?;
            if options.strict {
                DomainValidator::validate_document(self.schemas.translation_bundle(), &bundle)?;
            }
            debug!(%locale, "Translation bundle loaded");
            bundles.insert(locale, bundle);
        }

        resolver.retain(source.clone());
        for bundle in bundles.values() {
            resolver.retain(bundle.clone());
        }
        let definition = LogDef::assemble(source, bundles)?;

        info!(
            domain = %definition.domain_name(),
            locales = definition.locales().count(),
            groups = definition.groups().len(),
            entries = definition.entry_count(),
            "Definition loaded"
        );

        Ok(LoadedDefinition {
            definition,
            resolver: Arc::new(resolver),
        })
    }
}
