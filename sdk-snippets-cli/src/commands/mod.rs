pub(crate) mod check;
pub(crate) mod config;
pub(crate) mod delete;
pub(crate) mod export;
pub(crate) mod list;
pub(crate) mod render;
pub(crate) mod show;
pub(crate) mod stats;
pub(crate) mod upsert;
pub(crate) mod validate;

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use sdk_snippets_catalog::{Catalog, ConsistencyWarning, ExampleEntry, load_catalog};

use crate::CliError;
use crate::cli_types::KeyArgs;
use crate::settings;

/// Resolve the catalog path and load it. A missing file yields an empty catalog.
pub(crate) fn open_catalog(cli_override: Option<PathBuf>) -> Result<(PathBuf, Catalog), CliError> {
    let path = settings::resolve_catalog_path(cli_override);
    let catalog = load_catalog(&path)?;
    Ok((path, catalog))
}

/// Look up an entry, turning a miss into [`CliError::KeyNotFound`].
pub(crate) fn require_entry<'a>(
    catalog: &'a Catalog,
    key: &KeyArgs,
) -> Result<&'a ExampleEntry, CliError> {
    catalog
        .get(&key.service, &key.method)
        .ok_or_else(|| CliError::key_not_found(&key.service, &key.method))
}

/// Log each warning indented under its entry.
pub(crate) fn log_warnings(warnings: &[ConsistencyWarning]) {
    for w in warnings {
        log::warn!("  {}", w);
    }
}

/// Colored `service.method` label.
pub(crate) fn key_label(entry: &ExampleEntry) -> String {
    entry
        .key()
        .to_string()
        .if_supports_color(Stdout, |t| t.cyan())
        .to_string()
}

pub(crate) fn display_path(path: &Path) -> String {
    path.display()
        .if_supports_color(Stdout, |t| t.cyan())
        .to_string()
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_and_long() {
        assert_eq!(truncate_str("Lists buckets", 20), "Lists buckets");
        assert_eq!(truncate_str("Invokes a Lambda function", 10), "Invokes...");
        assert_eq!(truncate_str("abcdef", 2), "ab");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_str("héllo wörld", 8), "héllo...");
    }
}
