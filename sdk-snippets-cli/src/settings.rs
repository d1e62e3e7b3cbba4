//! User settings (catalog path, render and validation defaults).
//!
//! Settings live in `~/.config/sdk-snippets/settings.toml`:
//!
//! ```toml
//! [catalog]
//! path = "/home/me/snippets/catalog/snippets.yaml"
//!
//! [render]
//! sdk_version = "v3"
//!
//! [validation]
//! strict = false
//! ```

use std::io;
use std::path::{Path, PathBuf};

use sdk_snippets_catalog::DEFAULT_SDK_VERSION;

/// Canonical path to the settings file: `~/.config/sdk-snippets/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("sdk-snippets").join("settings.toml")
}

/// Catalog file used when neither the flag nor the settings name one.
pub(crate) fn default_catalog_path() -> PathBuf {
    PathBuf::from("catalog").join("snippets.yaml")
}

/// Resolve the catalog path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `catalog.path` in `settings.toml`
/// 3. `catalog/snippets.yaml` under the current directory
pub(crate) fn resolve_catalog_path(cli_override: Option<PathBuf>) -> PathBuf {
    resolve_catalog_path_in(&settings_path(), cli_override)
}

fn resolve_catalog_path_in(settings: &Path, cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    read_settings(settings)
        .as_ref()
        .and_then(|doc| lookup_str(doc, "catalog", "path"))
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_catalog_path)
}

/// SDK version label for rendering: CLI override, then `render.sdk_version`, then `v3`.
pub(crate) fn resolve_sdk_version(cli_override: Option<String>) -> String {
    resolve_sdk_version_in(&settings_path(), cli_override)
}

fn resolve_sdk_version_in(settings: &Path, cli_override: Option<String>) -> String {
    cli_override
        .or_else(|| {
            read_settings(settings)
                .as_ref()
                .and_then(|doc| lookup_str(doc, "render", "sdk_version"))
                .map(str::to_string)
        })
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SDK_VERSION.to_string())
}

/// Whether strict validation is on: the `--strict` flag or `validation.strict`.
pub(crate) fn resolve_strict(cli_flag: bool) -> bool {
    resolve_strict_in(&settings_path(), cli_flag)
}

fn resolve_strict_in(settings: &Path, cli_flag: bool) -> bool {
    cli_flag
        || read_settings(settings)
            .as_ref()
            .and_then(|doc| doc.get("validation")?.get("strict")?.as_bool())
            .unwrap_or(false)
}

/// Save the catalog path in `settings.toml`.
///
/// Uses `toml::Value` for a surgical update so other keys are preserved.
pub(crate) fn save_catalog_path(path: &Path) -> io::Result<()> {
    save_catalog_path_in(&settings_path(), path)
}

fn save_catalog_path_in(settings: &Path, path: &Path) -> io::Result<()> {
    let mut doc = read_settings(settings).unwrap_or_else(|| toml::Value::Table(Default::default()));

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let catalog = table
        .entry("catalog")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let catalog_table = catalog
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[catalog] is not a table"))?;
    catalog_table.insert(
        "path".to_string(),
        toml::Value::String(path.to_string_lossy().into_owned()),
    );

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    log::debug!("Saved catalog path {} to {}", path.display(), settings.display());
    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub(crate) fn load_settings_string() -> Option<String> {
    let doc = read_settings(&settings_path())?;
    toml::to_string_pretty(&doc).ok()
}

/// Parsed settings, or `None` when the file is missing or unreadable.
fn read_settings(path: &Path) -> Option<toml::Value> {
    let contents = std::fs::read_to_string(path).ok()?;
    match contents.parse() {
        Ok(doc) => Some(doc),
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}

fn lookup_str<'a>(doc: &'a toml::Value, table: &str, key: &str) -> Option<&'a str> {
    doc.get(table)?.get(key)?.as_str()
}
