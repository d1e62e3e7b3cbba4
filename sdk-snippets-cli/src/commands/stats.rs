use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_catalog;

pub(crate) fn run_stats(catalog: Option<PathBuf>) -> Result<(), CliError> {
    let (path, catalog) = open_catalog(catalog)?;

    log::info!(
        "{}",
        "Catalog Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Catalog: {}", path.display());
    crate::log_blank();

    for (service, count) in catalog.services() {
        log::info!("  {:<16}{:>6}", service, count);
    }
    log::info!("  {:<16}{:>6}", "total", catalog.len());
    log::info!(
        "  {:<16}{:>6}",
        "with warnings",
        catalog.validate_all().len(),
    );

    Ok(())
}
