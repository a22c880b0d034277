//! Implementation of the `logdoc check` command.

use logdoc_core::application::LoadOptions;
use serde_json::json;
use tracing::instrument;

use crate::{cli::CheckArgs, config::AppConfig, error::CliResult, output::OutputManager};

/// Load and validate a definition; nothing is written.
#[instrument(skip_all, fields(input = %args.input.display()))]
pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let options = LoadOptions {
        strict: !args.lenient && config.generation.strict,
    };

    let generator = super::generator(&config, config.templates.dir.as_deref())?;
    let loaded = generator.check(&args.input, options)?;
    let def = loaded.definition();

    let locales: Vec<&str> = def.locales().map(|l| l.as_str()).collect();
    let domain = if def.domain_name().is_empty() {
        "(default)"
    } else {
        def.domain_name().as_str()
    };

    output.success(&format!("{} is valid", args.input.display()))?;
    output.field("domain", domain)?;
    output.field("access level", def.access_level().as_str())?;
    output.field("locales", &locales.join(", "))?;
    output.field("groups", &def.groups().len().to_string())?;
    output.field("entries", &def.entry_count().to_string())?;
    if !options.strict {
        output.warning("Schema validation was skipped (--lenient)")?;
    }

    output.json(&json!({
        "valid": true,
        "strict": options.strict,
        "domain": def.domain_name().as_str(),
        "access_level": def.access_level().as_str(),
        "locales": locales,
        "groups": def.groups().len(),
        "entries": def.entry_count(),
    }))?;

    Ok(())
}
