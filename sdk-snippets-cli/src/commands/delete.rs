use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use sdk_snippets_catalog::save_catalog;

use crate::CliError;
use crate::cli_types::KeyArgs;

use super::{display_path, key_label, open_catalog};

/// Entry point for `delete`.
pub(crate) fn run_delete(
    catalog: Option<PathBuf>,
    key: KeyArgs,
    dry_run: bool,
) -> Result<(), CliError> {
    let (path, mut catalog) = open_catalog(catalog)?;

    let removed = catalog
        .delete(&key.service, &key.method)
        .ok_or_else(|| CliError::key_not_found(&key.service, &key.method))?;

    if dry_run {
        log::info!(
            "{} would delete {}",
            "[dry run]".if_supports_color(Stdout, |t| t.dimmed()),
            key_label(&removed),
        );
        return Ok(());
    }

    save_catalog(&path, &catalog)?;
    log::info!(
        "Deleted {}; saved {} ({} entries)",
        key_label(&removed),
        display_path(&path),
        catalog.len(),
    );
    Ok(())
}
