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
    name    = "armature",
    bin_name = "armature",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Armature generator framework",
    long_about = "Armature runs scaffolding generators: ordered steps, \
                  declarative arguments and options, delegated hooks, and \
                  per-project persisted configuration.",
    after_help = "EXAMPLES:\n\
        \x20 armature run app my-project\n\
        \x20 armature run app my-project --force\n\
        \x20 armature info app\n\
        \x20 armature list\n\
        \x20 armature completions bash > /usr/share/bash-completion/completions/armature",
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
    /// Run a generator's step pipeline.
    #[command(
        visible_alias = "r",
        about = "Run a generator",
        after_help = "EXAMPLES:\n\
            \x20 armature run app my-project\n\
            \x20 armature run app my-project --hooks\n\
            \x20 armature run model invoice --dest ./crm"
    )]
    Run(RunArgs),

    /// List registered generators.
    #[command(
        visible_alias = "ls",
        about = "List registered generators",
        after_help = "EXAMPLES:\n\
            \x20 armature list\n\
            \x20 armature list --format list"
    )]
    List(ListArgs),

    /// Show a generator's help and usage text.
    #[command(
        about = "Show a generator's options and usage",
        after_help = "EXAMPLES:\n\
            \x20 armature info app"
    )]
    Info(InfoArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 armature completions bash > ~/.local/share/bash-completion/completions/armature\n\
            \x20 armature completions zsh  > ~/.zfunc/_armature\n\
            \x20 armature completions fish > ~/.config/fish/completions/armature.fish"
    )]
    Completions(CompletionsArgs),
}

// ── run ───────────────────────────────────────────────────────────────────────

/// Arguments for `armature run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Generator namespace to run.
    #[arg(value_name = "GENERATOR", help = "Registered generator namespace")]
    pub namespace: String,

    /// Positional values handed to the generator's declared arguments.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        help = "Positional arguments for the generator"
    )]
    pub args: Vec<String>,

    /// Overwrite every diverging file without prompting.
    #[arg(
        short = 'f',
        long = "force",
        conflicts_with = "skip_all",
        help = "Overwrite diverging files without prompting"
    )]
    pub force: bool,

    /// Keep every diverging file without prompting.
    #[arg(long = "skip-all", help = "Keep diverging files without prompting")]
    pub skip_all: bool,

    /// Also run the generator's declared hooks after the pipeline.
    #[arg(long = "hooks", help = "Run declared hooks after the step pipeline")]
    pub hooks: bool,

    /// Directory the destination-root discovery starts from.
    #[arg(
        short = 'd',
        long = "dest",
        value_name = "DIR",
        help = "Start directory for destination-root discovery (default: CWD)"
    )]
    pub dest: Option<PathBuf>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `armature list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output layout.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output layout"
    )]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Namespace plus description.
    Table,
    /// One namespace per line.
    List,
}

// ── info ──────────────────────────────────────────────────────────────────────

/// Arguments for `armature info`.
#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Generator namespace to describe.
    #[arg(value_name = "GENERATOR", help = "Registered generator namespace")]
    pub namespace: String,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `armature completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, value_name = "SHELL", help = "Shell to generate for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
