use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{display_path, log_warnings, open_catalog};

/// Entry point for `validate`. Warnings never fail the command.
pub(crate) fn run_validate(catalog: Option<PathBuf>) -> Result<(), CliError> {
    let (path, catalog) = open_catalog(catalog)?;
    let report = catalog.validate_all();

    if report.is_empty() {
        log::info!(
            "{} {} entries in {} are consistent",
            "✓".if_supports_color(Stdout, |t| t.green()),
            catalog.len(),
            display_path(&path),
        );
        return Ok(());
    }

    for entry in &report {
        log::warn!(
            "{} ({} warning(s))",
            entry.key.to_string().if_supports_color(Stdout, |t| t.cyan()),
            entry.warnings.len(),
        );
        log_warnings(&entry.warnings);
    }
    crate::log_blank();
    let warning_count: usize = report.iter().map(|e| e.warnings.len()).sum();
    log::info!(
        "{} of {} entries have warnings ({} total)",
        report.len(),
        catalog.len(),
        warning_count,
    );
    Ok(())
}
