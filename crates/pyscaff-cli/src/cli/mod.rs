//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "pyscaff",
    bin_name = "pyscaff",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Edit, verify and scaffold Python projects",
    long_about = "pyscaff renders an annotated YAML description of a Python \
                  project, opens it in your editor, checks every field with \
                  line-accurate errors and generates the project once the \
                  document is valid.",
    after_help = "EXAMPLES:\n\
        \x20 pyscaff new my-tool\n\
        \x20 pyscaff template my-tool > my-tool.yaml\n\
        \x20 pyscaff check my-tool.yaml --json\n\
        \x20 pyscaff new my-tool --from my-tool.yaml --dry-run\n\
        \x20 pyscaff classifiers --filter Topic",
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
    /// Describe a project in your editor, then generate it.
    #[command(
        visible_alias = "n",
        about = "Create a new Python project",
        after_help = "EXAMPLES:\n\
            \x20 pyscaff new my-tool\n\
            \x20 pyscaff new my-tool -o ~/src --editor 'code --wait --goto @NAME@:@LINE@'\n\
            \x20 pyscaff new my-tool --from my-tool.yaml --force"
    )]
    New(NewArgs),

    /// Verify a project document.
    #[command(
        about = "Verify a project document",
        after_help = "EXAMPLES:\n\
            \x20 pyscaff check my-tool.yaml\n\
            \x20 pyscaff check - --json < my-tool.yaml"
    )]
    Check(CheckArgs),

    /// Print the annotated document `new` would open.
    #[command(
        about = "Print the project document template",
        after_help = "EXAMPLES:\n\
            \x20 pyscaff template\n\
            \x20 pyscaff template my-tool > my-tool.yaml"
    )]
    Template(TemplateArgs),

    /// List the known PyPI classifiers.
    #[command(
        visible_alias = "ls",
        about = "List PyPI classifiers",
        after_help = "EXAMPLES:\n\
            \x20 pyscaff classifiers\n\
            \x20 pyscaff classifiers --filter 'Topic ::'\n\
            \x20 pyscaff classifiers --format json"
    )]
    Classifiers(ClassifiersArgs),

    /// Initialise a pyscaff configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 pyscaff init\n\
            \x20 pyscaff init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 pyscaff completions bash > ~/.local/share/bash-completion/completions/pyscaff\n\
            \x20 pyscaff completions zsh  > ~/.zfunc/_pyscaff\n\
            \x20 pyscaff completions fish > ~/.config/fish/completions/pyscaff.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the pyscaff configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 pyscaff config get editor.command\n\
            \x20 pyscaff config list\n\
            \x20 pyscaff config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `pyscaff new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Default project name written into the document.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Directory the project directory is created in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = ".",
        help = "Output directory"
    )]
    pub output: PathBuf,

    /// Skip the editor and verify this document once.
    #[arg(
        long = "from",
        value_name = "FILE",
        help = "Use an already edited document (non-interactive)"
    )]
    pub from: Option<PathBuf>,

    /// Editor template; `@NAME@` is the file, `@LINE@` the error line.
    #[arg(
        short = 'e',
        long = "editor",
        value_name = "CMD",
        help = "Editor command template"
    )]
    pub editor: Option<String>,

    /// Built-in template to generate from.
    #[arg(
        short = 't',
        long = "template",
        value_name = "NAME",
        default_value = "python",
        help = "Built-in template"
    )]
    pub template: String,

    /// Replace an existing project directory (destructive).
    #[arg(long = "force", help = "Overwrite existing directory")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `pyscaff check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Document to verify; `-` reads standard input.
    #[arg(value_name = "FILE", help = "Document to verify ('-' for stdin)")]
    pub file: PathBuf,

    /// Print the projected configuration as JSON.
    #[arg(long = "json", help = "Print the verified configuration as JSON")]
    pub json: bool,
}

// ── template ──────────────────────────────────────────────────────────────────

/// Arguments for `pyscaff template`.
#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Project name used for the defaults.
    #[arg(
        value_name = "NAME",
        default_value = "my-project",
        help = "Project name"
    )]
    pub name: String,
}

// ── classifiers ───────────────────────────────────────────────────────────────

/// Arguments for `pyscaff classifiers`.
#[derive(Debug, Args)]
pub struct ClassifiersArgs {
    /// Only classifiers containing this text (case-insensitive).
    #[arg(short = 'f', long = "filter", value_name = "TEXT", help = "Filter by text")]
    pub filter: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "list",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `classifiers` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// One classifier per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `pyscaff init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `pyscaff completions`.
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

/// Subcommands for `pyscaff config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `editor.command`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
