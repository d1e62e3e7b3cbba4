//! sdk-snippets CLI
//!
//! Command-line interface for curating the SDK usage-example catalog.

mod cli_types;
mod commands;
mod error;
mod settings;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let catalog = cli.catalog;
    match cli.command {
        Commands::List { service } => commands::list::run_list(catalog, service),
        Commands::Show { key, format } => commands::show::run_show(catalog, key, format),
        Commands::Check { file, policy } => commands::check::run_check(&file, policy.strict),
        Commands::Upsert {
            file,
            policy,
            dry_run,
        } => commands::upsert::run_upsert(catalog, &file, policy.strict, dry_run),
        Commands::Delete { key, dry_run } => commands::delete::run_delete(catalog, key, dry_run),
        Commands::Validate => commands::validate::run_validate(catalog),
        Commands::Stats => commands::stats::run_stats(catalog),
        Commands::Render { key, sdk_version } => {
            commands::render::run_render(catalog, key, sdk_version)
        }
        Commands::Export {
            output,
            sdk_version,
        } => commands::export::run_export(catalog, output, sdk_version),
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Show => commands::config::run_config_show(catalog),
            ConfigAction::SetCatalog { path } => commands::config::run_config_set_catalog(&path),
        },
    }
}

/// Log an empty line (used for visual spacing between output sections).
pub(crate) fn log_blank() {
    log::info!("");
}

/// Route `log` output to stdout, and optionally to a file with ANSI escapes removed.
///
/// Normal output is bare `info` lines. `--quiet` keeps only warnings and
/// errors; `--verbose` adds debug messages with timestamps and targets.
fn init_logging(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let file = match logfile {
        Some(path) => Some(strip_ansi_escapes::Writer::new(File::create(path)?)),
        None => None,
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Pipe(Box::new(Tee { file })))
        .format(move |buf, record| {
            if verbose {
                write!(buf, "[{} {}] ", buf.timestamp_seconds(), record.target())?;
            }
            match record.level() {
                Level::Error => writeln!(
                    buf,
                    "{} {}",
                    "error:".if_supports_color(Stdout, |t| t.red()),
                    record.args()
                ),
                Level::Warn => writeln!(
                    buf,
                    "{} {}",
                    "warning:".if_supports_color(Stdout, |t| t.yellow()),
                    record.args()
                ),
                Level::Info => writeln!(buf, "{}", record.args()),
                Level::Debug | Level::Trace => writeln!(
                    buf,
                    "{}",
                    record.args().if_supports_color(Stdout, |t| t.dimmed())
                ),
            }
        });
    builder.init();
    Ok(())
}

/// Writes every log line to stdout and, when set, to the log file.
struct Tee {
    file: Option<strip_ansi_escapes::Writer<File>>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}
