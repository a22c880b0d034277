//! Implementation of the `logdoc templates` command.

use crate::{cli::TemplatesArgs, config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(args: TemplatesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dir = args.templates.as_deref().or(config.templates.dir.as_deref());
    let store = super::template_store(dir)?;
    let names = store.list()?;

    output.header("Available templates:")?;
    for name in &names {
        output.print(&format!("  {name}"))?;
    }
    output.json(&names)?;

    Ok(())
}
