use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use sdk_snippets_catalog::{Validator, load_candidates, save_catalog};

use crate::CliError;
use crate::settings;

use super::{display_path, log_warnings, open_catalog};

/// Entry point for `upsert`.
///
/// Every candidate in the file is merged in order. If any is rejected the
/// catalog file is left untouched.
pub(crate) fn run_upsert(
    catalog: Option<PathBuf>,
    file: &Path,
    strict: bool,
    dry_run: bool,
) -> Result<(), CliError> {
    let (path, mut catalog) = open_catalog(catalog)?;
    let candidates = load_candidates(file)?;
    let validator = Validator::new().strict(settings::resolve_strict(strict));

    let total = candidates.len();
    let (mut inserted, mut replaced, mut rejected) = (0usize, 0usize, 0usize);

    for candidate in candidates {
        let key = candidate.key().to_string();
        match catalog.upsert_with(&validator, candidate) {
            Ok(outcome) => {
                let verb = if outcome.is_update() {
                    replaced += 1;
                    "replaced".if_supports_color(Stdout, |t| t.yellow()).to_string()
                } else {
                    inserted += 1;
                    "inserted".if_supports_color(Stdout, |t| t.green()).to_string()
                };
                log::info!("  {} {}", verb, key.if_supports_color(Stdout, |t| t.cyan()));
                log_warnings(&outcome.warnings);
            }
            Err(e) => {
                rejected += 1;
                log::error!("{}", e);
            }
        }
    }

    crate::log_blank();
    if rejected > 0 {
        log::warn!("Catalog not saved");
        return Err(CliError::Rejected { rejected, total });
    }

    if dry_run {
        log::info!(
            "{} {} inserted, {} replaced (not saved)",
            "[dry run]".if_supports_color(Stdout, |t| t.dimmed()),
            inserted,
            replaced,
        );
        return Ok(());
    }

    save_catalog(&path, &catalog)?;
    log::info!(
        "{} inserted, {} replaced; saved {} ({} entries)",
        inserted,
        replaced,
        display_path(&path),
        catalog.len(),
    );
    Ok(())
}
