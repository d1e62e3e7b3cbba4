use std::fmt;

use thiserror::Error;

use crate::types::EntryKey;

/// An entry field, as named in the persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Service,
    Method,
    Description,
    Code,
    Parameters,
    Package,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Method => "method",
            Self::Description => "description",
            Self::Code => "code",
            Self::Parameters => "parameters",
            Self::Package => "package",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hard schema rule that was broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Required field is missing or blank.
    Empty,
    /// Code has an unclosed string or mismatched brackets.
    UnbalancedDelimiters,
    /// A parameter was declared with a blank name.
    EmptyParameterName,
    /// The same parameter name was declared more than once.
    DuplicateParameter(String),
    /// A consistency warning rejected under strict validation.
    PromotedWarning(ConsistencyWarning),
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("must not be empty"),
            Self::UnbalancedDelimiters => f.write_str("unclosed string or mismatched brackets"),
            Self::EmptyParameterName => f.write_str("parameter name must not be empty"),
            Self::DuplicateParameter(name) => {
                write!(f, "parameter '{name}' is declared more than once")
            }
            Self::PromotedWarning(w) => write!(f, "{w} (strict)"),
        }
    }
}

/// One broken hard rule: which field, and what was wrong with it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {rule}")]
pub struct SchemaViolation {
    pub field: Field,
    pub rule: Rule,
}

impl SchemaViolation {
    pub fn new(field: Field, rule: Rule) -> Self {
        Self { field, rule }
    }
}

/// A candidate was rejected. Carries every violation, not just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Key as submitted (normalized), for reporting only.
    pub key: EntryKey,
    pub violations: Vec<SchemaViolation>,
}

impl ValidationError {
    pub fn has_violation(&self, field: Field) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry '{}' rejected with {} violation(s)",
            self.key,
            self.violations.len()
        )?;
        for v in &self.violations {
            write!(f, "\n  - {v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Recoverable mismatch between an entry's code and its declared metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConsistencyWarning {
    /// Code passes a parameter that `parameters` does not declare.
    UndeclaredParameter(String),
    /// `parameters` declares a name the code never mentions.
    UnusedParameter(String),
    /// Code never mentions the declared package.
    PackageNotReferenced(String),
}

impl ConsistencyWarning {
    pub fn field(&self) -> Field {
        match self {
            Self::UndeclaredParameter(_) | Self::UnusedParameter(_) => Field::Parameters,
            Self::PackageNotReferenced(_) => Field::Package,
        }
    }
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndeclaredParameter(name) => {
                write!(f, "code passes '{name}' but it is not listed in parameters")
            }
            Self::UnusedParameter(name) => {
                write!(f, "parameter '{name}' is never referenced in code")
            }
            Self::PackageNotReferenced(package) => {
                write!(f, "package '{package}' does not appear in code")
            }
        }
    }
}

/// Errors from building, loading, or saving a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("YAML serialize error: {0}")]
    Serialize(#[source] serde_yml::Error),
    #[error("record #{index}: {source}")]
    Invalid {
        index: usize,
        source: ValidationError,
    },
    #[error("duplicate key '{key}' at records #{first} and #{second}")]
    DuplicateKey {
        key: EntryKey,
        first: usize,
        second: usize,
    },
}
