use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings;

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings::settings_path().display());
    Ok(())
}

/// Show the settings file and the values commands will actually use.
pub(crate) fn run_config_show(catalog: Option<PathBuf>) -> Result<(), CliError> {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "sdk-snippets Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let catalog_path = settings::resolve_catalog_path(catalog);
    let catalog_state = if catalog_path.exists() {
        "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "(not found, starts empty)"
            .if_supports_color(Stdout, |t| t.dimmed())
            .to_string()
    };
    log::info!(
        "  Catalog:       {} {}",
        catalog_path.display().if_supports_color(Stdout, |t| t.cyan()),
        catalog_state,
    );
    log::info!("  SDK version:   {}", settings::resolve_sdk_version(None));
    log::info!("  Strict:        {}", settings::resolve_strict(false));

    if let Some(contents) = settings::load_settings_string() {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("  {}", line.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }

    Ok(())
}

/// Save the default catalog path.
pub(crate) fn run_config_set_catalog(path: &Path) -> Result<(), CliError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    settings::save_catalog_path(&absolute).map_err(|e| {
        CliError::config(format!(
            "Failed to write {}: {}",
            settings::settings_path().display(),
            e
        ))
    })?;

    log::info!(
        "Catalog path set to {}",
        absolute.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    if !absolute.exists() {
        log::warn!(
            "{} does not exist yet; it will be created on the first upsert",
            absolute.display()
        );
    }
    Ok(())
}
