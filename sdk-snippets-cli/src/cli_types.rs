//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sdk-snippets")]
#[command(about = "Curate a catalog of SDK usage examples", long_about = None)]
pub(crate) struct Cli {
    /// Catalog YAML file (defaults to the saved setting, then ./catalog/snippets.yaml)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Validation policy flags shared by `check` and `upsert`.
#[derive(Args, Clone, Copy)]
pub(crate) struct PolicyArgs {
    /// Reject candidates with consistency warnings
    #[arg(long)]
    pub strict: bool,
}

/// The `<service> <method>` pair naming one entry.
#[derive(Args, Clone)]
pub(crate) struct KeyArgs {
    /// AWS service name (e.g., lambda, s3)
    pub service: String,

    /// Operation name (e.g., invoke, put_object)
    pub method: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ShowFormat {
    #[default]
    Text,
    Yaml,
    Json,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List catalog entries in catalog order
    List {
        /// Only list entries for this service
        #[arg(short, long)]
        service: Option<String>,
    },

    /// Show one entry
    Show {
        #[command(flatten)]
        key: KeyArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ShowFormat::Text)]
        format: ShowFormat,
    },

    /// Validate a candidate file without touching the catalog
    Check {
        /// Candidate YAML file (one record or a list)
        file: PathBuf,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Validate candidates and insert or replace them in the catalog
    Upsert {
        /// Candidate YAML file (one record or a list)
        file: PathBuf,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Show what would change without saving
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Remove an entry from the catalog
    Delete {
        #[command(flatten)]
        key: KeyArgs,

        /// Show what would be removed without saving
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Re-run consistency checks over every stored entry
    Validate,

    /// Show entry counts per service
    Stats,

    /// Print the retrieval chunk text for one entry
    Render {
        #[command(flatten)]
        key: KeyArgs,

        /// SDK version label (defaults to the saved setting, then v3)
        #[arg(long)]
        sdk_version: Option<String>,
    },

    /// Export every entry as JSON Lines chunk records
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// SDK version label (defaults to the saved setting, then v3)
        #[arg(long)]
        sdk_version: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the settings file path
    Path,

    /// Show the current settings and the resolved catalog path
    Show,

    /// Save the default catalog path
    SetCatalog {
        /// Path to the catalog YAML file
        path: PathBuf,
    },
}
