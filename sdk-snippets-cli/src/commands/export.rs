use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use sdk_snippets_catalog::{Catalog, ChunkRecord};

use crate::CliError;
use crate::settings;

use super::{display_path, open_catalog};

/// Entry point for `export`: one JSON chunk record per line.
///
/// Without `--output`, records are written straight to stdout, not through
/// the logger.
pub(crate) fn run_export(
    catalog: Option<PathBuf>,
    output: Option<PathBuf>,
    sdk_version: Option<String>,
) -> Result<(), CliError> {
    let (_, catalog) = open_catalog(catalog)?;
    let version = settings::resolve_sdk_version(sdk_version);

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let mut out = BufWriter::new(File::create(&path)?);
            let count = write_records(&catalog, &version, &mut out)?;
            out.flush()?;
            log::info!(
                "Exported {} chunk records ({}) to {}",
                count,
                version,
                display_path(&path),
            );
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_records(&catalog, &version, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn write_records(
    catalog: &Catalog,
    version: &str,
    out: &mut impl Write,
) -> Result<usize, CliError> {
    let mut count = 0;
    for entry in catalog.list() {
        let line = ChunkRecord::new(entry, version)
            .and_then(|record| record.to_json_line())
            .map_err(|e| CliError::export(format!("{}: {}", entry.key(), e)))?;
        writeln!(out, "{}", line)?;
        count += 1;
    }
    log::debug!("Wrote {} chunk records", count);
    Ok(count)
}
