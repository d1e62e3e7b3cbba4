//! SDK usage-example catalog: data model, validation, store, and YAML I/O.
//!
//! Candidate entries come from an external curation step. They pass through
//! the [`Validator`], get merged into a [`Catalog`] with [`Catalog::upsert`],
//! and are persisted with [`save_catalog`]. Downstream tools read entries
//! back through [`Catalog::get`] and [`Catalog::list`].

pub mod error;
pub mod render;
pub mod store;
pub mod types;
pub mod validator;
pub mod yaml;

pub use error::{CatalogError, ConsistencyWarning, Field, Rule, SchemaViolation, ValidationError};
pub use render::{ChunkRecord, DEFAULT_SDK_VERSION, chunk_text, label};
pub use store::{Catalog, EntryWarnings, SharedCatalog, UpsertOutcome};
pub use types::{EntryKey, ExampleEntry, Parameter};
pub use validator::{Validated, Validator, check_consistency, validate};
pub use yaml::{entry_to_string, load_candidate, load_candidates, load_catalog, save_catalog};
