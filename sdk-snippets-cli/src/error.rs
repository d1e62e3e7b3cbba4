use sdk_snippets_catalog::CatalogError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Loading or saving the catalog failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Some candidates in a file were rejected
    #[error("{rejected} of {total} candidate(s) rejected")]
    Rejected { rejected: usize, total: usize },

    /// No entry under the requested key
    #[error("No entry for {0}")]
    KeyNotFound(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Export encoding error
    #[error("Export error: {0}")]
    Export(String),
}

impl CliError {
    pub(crate) fn key_not_found(service: &str, method: &str) -> Self {
        Self::KeyNotFound(format!("{}.{}", service.trim(), method.trim()))
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}
