use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use sdk_snippets_catalog::ExampleEntry;

use crate::CliError;

use super::{key_label, open_catalog, truncate_str};

const DESCRIPTION_WIDTH: usize = 60;

/// Entry point for `list`.
pub(crate) fn run_list(catalog: Option<PathBuf>, service: Option<String>) -> Result<(), CliError> {
    let (path, catalog) = open_catalog(catalog)?;

    let entries: Vec<&ExampleEntry> = match &service {
        Some(s) => catalog.by_service(s).collect(),
        None => catalog.list().collect(),
    };

    if entries.is_empty() {
        match service {
            Some(s) => log::warn!("No entries for service '{}' in {}", s, path.display()),
            None => log::warn!("Catalog {} is empty", path.display()),
        }
        return Ok(());
    }

    let width = entries
        .iter()
        .map(|e| e.service.len() + e.method.len() + 1)
        .max()
        .unwrap_or(0);
    for entry in &entries {
        let pad = width - (entry.service.len() + entry.method.len() + 1);
        log::info!(
            "  {}{}  {}",
            key_label(entry),
            " ".repeat(pad),
            truncate_str(&entry.description, DESCRIPTION_WIDTH),
        );
    }
    crate::log_blank();
    log::info!(
        "{}",
        format!("{} entries", entries.len()).if_supports_color(Stdout, |t| t.dimmed()),
    );

    Ok(())
}
