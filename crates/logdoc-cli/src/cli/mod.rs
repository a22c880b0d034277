//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "logdoc",
    bin_name = "logdoc",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate log classes from log definitions",
    long_about = "Logdoc reads a log definition directory (log.xml plus one \
                  translation bundle per locale) and generates Java log and \
                  translation classes from it.",
    after_help = "EXAMPLES:\n\
        \x20 logdoc generate -i src/logdoc -o build/generated\n\
        \x20 logdoc generate -i src/logdoc --target slf4j\n\
        \x20 logdoc check -i src/logdoc\n\
        \x20 logdoc completions bash > /usr/share/bash-completion/completions/logdoc",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate log classes from a definition directory.
    #[command(
        visible_alias = "gen",
        about = "Generate log classes",
        after_help = "EXAMPLES:\n\
            \x20 logdoc generate                         # current directory, in place\n\
            \x20 logdoc generate -i defs -o target/gen\n\
            \x20 logdoc generate -i defs --lenient --templates my-templates"
    )]
    Generate(GenerateArgs),

    /// Load and validate a definition without writing anything.
    #[command(
        about = "Validate a definition",
        after_help = "EXAMPLES:\n\
            \x20 logdoc check -i defs\n\
            \x20 logdoc check -i defs --output-format json"
    )]
    Check(CheckArgs),

    /// List the templates available to `generate`.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 logdoc templates\n\
            \x20 logdoc templates --templates my-templates"
    )]
    Templates(TemplatesArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 logdoc completions bash > ~/.local/share/bash-completion/completions/logdoc\n\
            \x20 logdoc completions zsh  > ~/.zfunc/_logdoc\n\
            \x20 logdoc completions fish > ~/.config/fish/completions/logdoc.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Logdoc configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 logdoc config get generation.target\n\
            \x20 logdoc config list\n\
            \x20 logdoc config init"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `logdoc generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Definition directory.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "DIR",
        default_value = ".",
        help = "Directory containing log.xml and its translation bundles"
    )]
    pub input: PathBuf,

    /// Destination directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Destination directory (default: the input directory)"
    )]
    pub output: Option<PathBuf>,

    /// Alternative template set for the log class.
    #[arg(
        short = 't',
        long = "target",
        value_name = "TARGET",
        help = "Template set for the log class, e.g. slf4j"
    )]
    pub target: Option<String>,

    /// Skip schema validation.
    #[arg(long = "lenient", help = "Skip schema validation of the inputs")]
    pub lenient: bool,

    /// Directory whose `templates/` overrides the built-in templates.
    #[arg(
        long = "templates",
        value_name = "DIR",
        help = "Directory with user templates (overrides built-ins)"
    )]
    pub templates: Option<PathBuf>,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `logdoc check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Definition directory.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "DIR",
        default_value = ".",
        help = "Directory containing log.xml and its translation bundles"
    )]
    pub input: PathBuf,

    /// Skip schema validation.
    #[arg(long = "lenient", help = "Skip schema validation of the inputs")]
    pub lenient: bool,
}

// ── templates ─────────────────────────────────────────────────────────────────

/// Arguments for `logdoc templates`.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Directory whose `templates/` overrides the built-in templates.
    #[arg(
        long = "templates",
        value_name = "DIR",
        help = "Directory with user templates (overrides built-ins)"
    )]
    pub templates: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `logdoc completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `logdoc config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.strict`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
    /// Write a configuration file with the default values.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "logdoc",
            "generate",
            "-i",
            "defs",
            "-o",
            "out",
            "--target",
            "slf4j",
            "--lenient",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.input, PathBuf::from("defs"));
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert_eq!(args.target.as_deref(), Some("slf4j"));
        assert!(args.lenient);
        assert!(args.templates.is_none());
    }

    #[test]
    fn generate_defaults_to_current_directory() {
        let cli = Cli::parse_from(["logdoc", "gen"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.input, PathBuf::from("."));
        assert!(args.output.is_none());
        assert!(!args.lenient);
    }

    #[test]
    fn suggested_check_command_is_accepted() {
        let err = logdoc_core::application::ApplicationError::InvalidArgument {
            message: "nope is not an existing directory".into(),
        };
        let suggestion = err
            .suggestions()
            .into_iter()
            .find_map(|s| s.strip_prefix("Try: ").map(str::to_string))
            .unwrap();

        let argv = suggestion.replace("<dir>", "defs");
        let cli = Cli::try_parse_from(argv.split_whitespace()).unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected Check command");
        };
        assert_eq!(args.input, PathBuf::from("defs"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["logdoc", "check", "-vv", "--output-format", "json"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["logdoc", "--quiet", "--verbose", "templates"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_init_accepts_force() {
        let cli = Cli::parse_from(["logdoc", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init { force: true })
        ));
    }
}
