use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use sdk_snippets_catalog::{ExampleEntry, entry_to_string};

use crate::CliError;
use crate::cli_types::{KeyArgs, ShowFormat};

use super::{key_label, open_catalog, require_entry};

/// Entry point for `show`.
pub(crate) fn run_show(
    catalog: Option<PathBuf>,
    key: KeyArgs,
    format: ShowFormat,
) -> Result<(), CliError> {
    let (_, catalog) = open_catalog(catalog)?;
    let entry = require_entry(&catalog, &key)?;

    match format {
        ShowFormat::Text => print_entry(entry),
        ShowFormat::Yaml => log::info!("{}", entry_to_string(entry)?.trim_end()),
        ShowFormat::Json => {
            let json = serde_json::to_string_pretty(entry)
                .map_err(|e| CliError::export(e.to_string()))?;
            log::info!("{}", json);
        }
    }

    Ok(())
}

fn print_entry(entry: &ExampleEntry) {
    log::info!("{}", key_label(entry).if_supports_color(Stdout, |t| t.bold()));
    log::info!("  {}", entry.description);
    log::info!(
        "  Package: {}",
        entry.package.if_supports_color(Stdout, |t| t.green()),
    );
    crate::log_blank();

    if entry.parameters.is_empty() {
        log::info!("  {}", "No parameters".if_supports_color(Stdout, |t| t.dimmed()));
    } else {
        log::info!("  {}", "Parameters:".if_supports_color(Stdout, |t| t.bold()));
        for p in &entry.parameters {
            log::info!(
                "    {}: {}",
                p.name.if_supports_color(Stdout, |t| t.yellow()),
                p.description,
            );
        }
    }
    crate::log_blank();

    for line in entry.code.trim_end().lines() {
        log::info!("    {}", line);
    }
}
