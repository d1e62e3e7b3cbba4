use std::path::PathBuf;

use sdk_snippets_catalog::chunk_text;

use crate::CliError;
use crate::cli_types::KeyArgs;
use crate::settings;

use super::{open_catalog, require_entry};

/// Entry point for `render`: print the retrieval chunk text for one entry.
pub(crate) fn run_render(
    catalog: Option<PathBuf>,
    key: KeyArgs,
    sdk_version: Option<String>,
) -> Result<(), CliError> {
    let (_, catalog) = open_catalog(catalog)?;
    let entry = require_entry(&catalog, &key)?;
    let version = settings::resolve_sdk_version(sdk_version);

    log::info!("{}", chunk_text(entry, &version));
    Ok(())
}
