//! Command handlers.
//!
//! Each handler translates parsed arguments plus [`AppConfig`] into calls on
//! the core services and renders the result. No generation logic lives here.

use std::path::Path;
use std::sync::Arc;

use logdoc_adapters::{
    DirectoryTemplateStore, EmbeddedTemplateStore, LocalFilesystem, MiniJinjaEngine, XmlParser,
    load_schema_set,
};
use logdoc_core::application::{Generator, ports::TemplateStore};
use tracing::debug;

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod check;
pub mod completions;
pub mod config;
pub mod generate;
pub mod templates;

/// Built-in templates, overlaid by `dir/templates/` when `dir` is given.
pub(crate) fn template_store(dir: Option<&Path>) -> CliResult<Arc<dyn TemplateStore>> {
    let builtin: Arc<dyn TemplateStore> = Arc::new(EmbeddedTemplateStore::new());
    let Some(dir) = dir else {
        return Ok(builtin);
    };

    if !dir.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("template directory {} does not exist", dir.display()),
            source: None,
        });
    }
    debug!(dir = %dir.display(), "Using user templates");
    Ok(Arc::new(
        DirectoryTemplateStore::new(dir).with_fallback(builtin),
    ))
}

/// Wire the production adapters into a [`Generator`].
///
/// Schemas are loaded here, so a broken schema override surfaces as a
/// configuration error before any input is read.
pub(crate) fn generator(config: &AppConfig, templates: Option<&Path>) -> CliResult<Generator> {
    let schemas = load_schema_set(config.schemas.dir.as_deref())?;

    Ok(Generator::new(
        Arc::new(LocalFilesystem::new()),
        Arc::new(XmlParser::new()),
        template_store(templates)?,
        Arc::new(MiniJinjaEngine::new()),
        Arc::new(schemas),
    ))
}
