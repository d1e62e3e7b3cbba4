//! YAML persistence for the curated catalog and for candidate entries.
//!
//! The catalog is a single file holding a sequence of entry records:
//!
//! ```text
//! - service: s3
//!   method: get_object
//!   description: Downloads an object from S3
//!   code: |-
//!     import { S3Client, GetObjectCommand } from "@aws-sdk/client-s3";
//!     ...
//!   parameters:
//!     Bucket: Name of the bucket
//!     Key: Object key
//!   package: "@aws-sdk/client-s3"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::store::Catalog;
use crate::types::ExampleEntry;

/// A candidate file may hold one record or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<ExampleEntry>),
    One(ExampleEntry),
}

/// Load the catalog file. A missing file yields an empty catalog.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    if !path.exists() {
        log::debug!("No catalog at {}, starting empty", path.display());
        return Ok(Catalog::new());
    }
    let contents = read_file(path)?;
    // An empty file parses as unit, not as an empty sequence.
    if contents.trim().is_empty() {
        return Ok(Catalog::new());
    }
    let entries: Vec<ExampleEntry> = parse(path, &contents)?;
    let catalog = Catalog::from_entries(entries)?;
    log::debug!("Loaded {} entries from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Write the catalog atomically (temp file, then rename).
pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let entries: Vec<&ExampleEntry> = catalog.list().collect();
    let serialized = serde_yml::to_string(&entries).map_err(CatalogError::Serialize)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    let tmp = path.with_extension("yaml.tmp");
    std::fs::write(&tmp, serialized).map_err(|e| io_error(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| io_error(path, e))?;

    log::debug!("Saved {} entries to {}", catalog.len(), path.display());
    Ok(())
}

/// Load a single candidate record.
pub fn load_candidate(path: &Path) -> Result<ExampleEntry, CatalogError> {
    let contents = read_file(path)?;
    parse(path, &contents)
}

/// Load one candidate record or a list of them, for bulk imports.
pub fn load_candidates(path: &Path) -> Result<Vec<ExampleEntry>, CatalogError> {
    let contents = read_file(path)?;
    Ok(match parse::<OneOrMany>(path, &contents)? {
        OneOrMany::Many(entries) => entries,
        OneOrMany::One(entry) => vec![entry],
    })
}

/// Serialize one entry as a YAML record, e.g. for display.
pub fn entry_to_string(entry: &ExampleEntry) -> Result<String, CatalogError> {
    serde_yml::to_string(entry).map_err(CatalogError::Serialize)
}

fn read_file(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|e| io_error(path, e))
}

fn parse<T: serde::de::DeserializeOwned>(path: &Path, contents: &str) -> Result<T, CatalogError> {
    serde_yml::from_str(contents).map_err(|e| CatalogError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

fn io_error(path: &Path, source: std::io::Error) -> CatalogError {
    CatalogError::Io {
        path: path.display().to_string(),
        source,
    }
}
