//! Implementation of the `logdoc generate` command.

use logdoc_core::{
    application::{GenerateOptions, GenerationReport},
    domain::Target,
    error::LogdocError,
};
use serde_json::json;
use tracing::{debug, instrument};

use crate::{cli::GenerateArgs, config::AppConfig, error::CliResult, output::OutputManager};

/// Execute the `logdoc generate` command.
///
/// Flags win over the config file: `--target`, `--templates` and
/// `--lenient` each replace the matching `generation.*` / `templates.dir`
/// setting.
#[instrument(skip_all, fields(input = %args.input.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let options = options(&args, &config)?;
    debug!(?options, "Generation options resolved");

    let templates = args.templates.as_deref().or(config.templates.dir.as_deref());
    let generator = super::generator(&config, templates)?;

    let report = generator.generate(&args.input, args.output.as_deref(), &options)?;

    output.success(&format!(
        "Generated {} files for {} in {} ms",
        report.files.len(),
        domain_label(&report),
        report.elapsed.as_millis(),
    ))?;
    for file in &report.files {
        output.print(&format!("  {}", file.display()))?;
    }
    output.json(&to_json(&report, &options))?;

    Ok(())
}

fn options(args: &GenerateArgs, config: &AppConfig) -> CliResult<GenerateOptions> {
    let target = args
        .target
        .as_deref()
        .or(config.generation.target.as_deref())
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<Target>())
        .transpose()
        .map_err(LogdocError::from)?;

    Ok(GenerateOptions {
        target,
        strict: !args.lenient && config.generation.strict,
    })
}

fn domain_label(report: &GenerationReport) -> &str {
    if report.domain.is_empty() {
        "the default domain"
    } else {
        report.domain.as_str()
    }
}

fn to_json(report: &GenerationReport, options: &GenerateOptions) -> serde_json::Value {
    json!({
        "domain": report.domain.as_str(),
        "access_level": report.access_level.as_str(),
        "target": options.target.as_ref().map(Target::as_str),
        "strict": options.strict,
        "source_dir": report.source_dir,
        "dest_dir": report.dest_dir,
        "files": report.files,
        "locales": report.locales.iter().map(|l| l.as_str()).collect::<Vec<_>>(),
        "groups": report.groups,
        "entries": report.entries,
        "elapsed_ms": report.elapsed.as_millis() as u64,
        "generated_at": chrono::Utc::now().to_rfc3339(),
    })
}
