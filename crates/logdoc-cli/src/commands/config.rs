//! `logdoc config`: inspect and initialise configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::{AppConfig, KEYS},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.is_json() {
                output.json(&BTreeMap::from([(key, value)]))?;
            } else {
                output.print(&value)?;
            }
        }

        ConfigCommands::List => {
            output.header("Current configuration:")?;
            for key in KEYS {
                output.print(&format!("{key} = {:?}", config.get(key).unwrap_or_default()))?;
            }
            output.json(&config)?;
        }

        ConfigCommands::Path => {
            output.print(&active_path(global).display().to_string())?;
        }

        ConfigCommands::Init { force } => init(&active_path(global), force, &output)?,
    }

    Ok(())
}

fn active_path(global: &GlobalArgs) -> PathBuf {
    global.config.clone().unwrap_or_else(AppConfig::config_path)
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    config.get(key).ok_or_else(|| CliError::InvalidInput {
        message: format!("Unknown config key: '{key}' (known keys: {})", KEYS.join(", ")),
        source: None,
    })
}

/// Write the default configuration to `path` unless it already exists.
fn init(path: &Path, force: bool, output: &OutputManager) -> CliResult<()> {
    if path.exists() && !force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            path.display(),
        ))?;
        return Ok(());
    }

    let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;

    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use tempfile::TempDir;

    fn quiet_output() -> OutputManager {
        let args = GlobalArgs {
            quiet: true,
            output_format: OutputFormat::Plain,
            ..GlobalArgs::default()
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "generation.strict").unwrap(), "true");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::InvalidInput { .. })
        ));
    }

    #[test]
    fn init_writes_a_loadable_file_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("logdoc.toml");

        init(&path, false, &quiet_output()).unwrap();
        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, AppConfig::default());

        std::fs::write(&path, "[generation]\nstrict = false\n").unwrap();
        init(&path, false, &quiet_output()).unwrap();
        assert!(!AppConfig::load(Some(&path)).unwrap().generation.strict);

        init(&path, true, &quiet_output()).unwrap();
        assert!(AppConfig::load(Some(&path)).unwrap().generation.strict);
    }
}
