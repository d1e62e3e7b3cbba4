use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use sdk_snippets_catalog::{Validator, load_candidates};

use crate::CliError;
use crate::settings;

use super::{key_label, log_warnings};

/// Entry point for `check`: validate candidates without loading the catalog.
pub(crate) fn run_check(file: &Path, strict: bool) -> Result<(), CliError> {
    let candidates = load_candidates(file)?;
    let validator = Validator::new().strict(settings::resolve_strict(strict));

    let total = candidates.len();
    let mut rejected = 0;
    for candidate in &candidates {
        match validator.validate(candidate) {
            Ok(validated) => {
                let status = if validated.warnings.is_empty() {
                    "ok".if_supports_color(Stdout, |t| t.green()).to_string()
                } else {
                    format!("ok, {} warning(s)", validated.warnings.len())
                        .if_supports_color(Stdout, |t| t.yellow())
                        .to_string()
                };
                log::info!("  {} {}", key_label(&validated.entry), status);
                log_warnings(&validated.warnings);
            }
            Err(e) => {
                rejected += 1;
                log::error!("{}", e);
            }
        }
    }

    if rejected > 0 {
        return Err(CliError::Rejected { rejected, total });
    }
    crate::log_blank();
    log::info!("{} candidate(s) valid", total);
    Ok(())
}
