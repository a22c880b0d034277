//! Schema loading.
//!
//! The two schemas ship inside the binary. A schema directory can override
//! either of them with a `<name>.toml` file of the same format:
//!
//! ```toml
//! name = "translation-bundle"
//! root = "translation-bundle"
//!
//! [[element]]
//! name  = "translation"
//! text  = true
//! attribute = [{ name = "entry", type = "identifier", required = true }]
//! child     = [{ name = "value-of-param" }]
//! ```
//!
//! Every failure here is a configuration error: without both schemas no
//! definition can be loaded, so callers treat it as fatal at start-up.

use std::fs;
use std::path::Path;

use logdoc_core::{
    domain::{DomainValidator, LOG_SCHEMA, Schema, SchemaSet, TRANSLATION_BUNDLE_SCHEMA},
    error::{LogdocError, LogdocResult},
};
use tracing::{debug, instrument};

const BUILTIN_LOG: &str = include_str!("../schemas/log.toml");
const BUILTIN_TRANSLATION_BUNDLE: &str = include_str!("../schemas/translation-bundle.toml");

fn builtin(name: &str) -> Option<&'static str> {
    match name {
        LOG_SCHEMA => Some(BUILTIN_LOG),
        TRANSLATION_BUNDLE_SCHEMA => Some(BUILTIN_TRANSLATION_BUNDLE),
        _ => None,
    }
}

/// Load one schema by name, preferring `<dir>/<name>.toml` when `dir` has it.
///
/// # Errors
///
/// `LogdocError::Configuration` if the schema cannot be found, does not
/// parse, names itself differently, or is internally inconsistent.
#[instrument(skip(dir), fields(dir = ?dir.map(Path::display)))]
pub fn load_schema(name: &str, dir: Option<&Path>) -> LogdocResult<Schema> {
    let override_path = dir.map(|d| d.join(format!("{name}.toml")));

    let (origin, raw) = match override_path.filter(|p| p.is_file()) {
        Some(path) => {
            let raw = fs::read_to_string(&path).map_err(|e| {
                LogdocError::configuration(format!(
                    "failed to read schema '{}': {e}",
                    path.display()
                ))
            })?;
            (path.display().to_string(), raw)
        }
        None => {
            let raw = builtin(name).ok_or_else(|| {
                LogdocError::configuration(format!("unknown schema '{name}'"))
            })?;
            (format!("built-in {name}.toml"), raw.to_string())
        }
    };

    let schema: Schema = toml::from_str(&raw).map_err(|e| {
        LogdocError::configuration(format!("failed to parse schema '{origin}': {e}"))
    })?;

    if schema.name != name {
        return Err(LogdocError::configuration(format!(
            "schema '{origin}' is named '{}', expected '{name}'",
            schema.name
        )));
    }

    DomainValidator::validate_schema(&schema).map_err(|reason| {
        LogdocError::configuration(format!("schema '{origin}' is inconsistent: {reason}"))
    })?;

    debug!(schema = name, %origin, rules = schema.elements.len(), "Schema loaded");
    Ok(schema)
}

/// Load both schemas. Called once at process start.
pub fn load_schema_set(dir: Option<&Path>) -> LogdocResult<SchemaSet> {
    Ok(SchemaSet::new(
        load_schema(LOG_SCHEMA, dir)?,
        load_schema(TRANSLATION_BUNDLE_SCHEMA, dir)?,
    ))
}
