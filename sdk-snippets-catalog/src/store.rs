//! Ordered, uniquely-keyed catalog store.
//!
//! [`Catalog`] keeps entries in insertion order in a `Vec`, with a side
//! index from [`EntryKey`] to position for key lookups. [`SharedCatalog`]
//! wraps it for callers that need to share one catalog across threads.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{CatalogError, ConsistencyWarning, ValidationError};
use crate::types::{EntryKey, ExampleEntry, normalize_identifier};
use crate::validator::{Validated, Validator, check_consistency};

/// Result of a successful upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// The entry that was replaced, or `None` for a fresh insertion.
    pub previous: Option<ExampleEntry>,
    pub warnings: Vec<ConsistencyWarning>,
}

impl UpsertOutcome {
    pub fn is_update(&self) -> bool {
        self.previous.is_some()
    }
}

/// Consistency warnings for one stored entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryWarnings {
    pub key: EntryKey,
    pub warnings: Vec<ConsistencyWarning>,
}

/// The usage-example catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<ExampleEntry>,
    by_key: HashMap<EntryKey, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from persisted records, in order.
    ///
    /// Every record must pass the hard rules and keys must be unique;
    /// records are normalized on the way in. Warnings are not checked here,
    /// use [`Catalog::validate_all`] for that.
    pub fn from_entries(entries: Vec<ExampleEntry>) -> Result<Self, CatalogError> {
        let validator = Validator::default();
        let mut catalog = Self::new();
        catalog.entries.reserve(entries.len());

        for (index, candidate) in entries.into_iter().enumerate() {
            let validated = validator
                .validate(&candidate)
                .map_err(|source| CatalogError::Invalid { index, source })?;
            let key = validated.entry.key();
            if let Some(&first) = catalog.by_key.get(&key) {
                return Err(CatalogError::DuplicateKey {
                    key,
                    first,
                    second: index,
                });
            }
            catalog.by_key.insert(key, catalog.entries.len());
            catalog.entries.push(validated.entry);
        }

        Ok(catalog)
    }

    /// Look up an entry. Service and method are normalized first.
    pub fn get(&self, service: &str, method: &str) -> Option<&ExampleEntry> {
        self.get_by_key(&EntryKey::new(service, method))
    }

    pub fn get_by_key(&self, key: &EntryKey) -> Option<&ExampleEntry> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, service: &str, method: &str) -> bool {
        self.by_key.contains_key(&EntryKey::new(service, method))
    }

    /// Entries in insertion order. Each call starts a fresh traversal.
    pub fn list(&self) -> impl Iterator<Item = &ExampleEntry> + '_ {
        self.entries.iter()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = EntryKey> + '_ {
        self.entries.iter().map(ExampleEntry::key)
    }

    /// Entries for one service, in insertion order.
    pub fn by_service(&self, service: &str) -> impl Iterator<Item = &ExampleEntry> {
        let service = normalize_identifier(service);
        self.entries.iter().filter(move |e| e.service == service)
    }

    /// Distinct services with their entry counts, in first-seen order.
    pub fn services(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for entry in &self.entries {
            match counts.iter_mut().find(|(s, _)| *s == entry.service) {
                Some((_, n)) => *n += 1,
                None => counts.push((entry.service.clone(), 1)),
            }
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace with the default validation policy.
    pub fn upsert(&mut self, candidate: ExampleEntry) -> Result<UpsertOutcome, ValidationError> {
        self.upsert_with(&Validator::default(), candidate)
    }

    /// Insert or replace under the given policy.
    ///
    /// An existing entry with the same key is replaced in place, keeping its
    /// position; otherwise the entry is appended. A rejected candidate
    /// leaves the catalog untouched.
    pub fn upsert_with(
        &mut self,
        validator: &Validator,
        candidate: ExampleEntry,
    ) -> Result<UpsertOutcome, ValidationError> {
        let validated = validator.validate(&candidate)?;
        Ok(self.apply(validated))
    }

    /// Store an entry that already passed validation.
    pub(crate) fn apply(&mut self, validated: Validated) -> UpsertOutcome {
        let key = validated.entry.key();

        let previous = match self.by_key.get(&key) {
            Some(&i) => {
                log::debug!("Replacing {} at position {}", key, i);
                Some(std::mem::replace(&mut self.entries[i], validated.entry))
            }
            None => {
                log::debug!("Appending {} at position {}", key, self.entries.len());
                self.by_key.insert(key, self.entries.len());
                self.entries.push(validated.entry);
                None
            }
        };

        UpsertOutcome {
            previous,
            warnings: validated.warnings,
        }
    }

    /// Remove an entry. `None` means no entry had that key.
    ///
    /// Remaining entries keep their relative order.
    pub fn delete(&mut self, service: &str, method: &str) -> Option<ExampleEntry> {
        let key = EntryKey::new(service, method);
        let pos = self.by_key.remove(&key)?;
        let removed = self.entries.remove(pos);
        for i in self.by_key.values_mut() {
            if *i > pos {
                *i -= 1;
            }
        }
        log::debug!("Deleted {} from position {}", key, pos);
        Some(removed)
    }

    /// Re-run the soft checks over every stored entry.
    ///
    /// Only entries with at least one warning are returned.
    pub fn validate_all(&self) -> Vec<EntryWarnings> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let warnings = check_consistency(entry);
                (!warnings.is_empty()).then(|| EntryWarnings {
                    key: entry.key(),
                    warnings,
                })
            })
            .collect()
    }
}

/// A catalog shared between threads.
///
/// Mutations take the write lock, so the key check and the write happen in
/// one critical section. Reads take the read lock and hand back clones, so a
/// reader sees an entry either fully before or fully after an upsert.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    pub fn get(&self, service: &str, method: &str) -> Option<ExampleEntry> {
        self.read(|c| c.get(service, method).cloned())
    }

    /// Snapshot of the entries at the time of the call.
    pub fn list(&self) -> std::vec::IntoIter<ExampleEntry> {
        self.read(|c| c.list().cloned().collect::<Vec<_>>()).into_iter()
    }

    pub fn len(&self) -> usize {
        self.read(Catalog::len)
    }

    pub fn is_empty(&self) -> bool {
        self.read(Catalog::is_empty)
    }

    pub fn upsert(&self, candidate: ExampleEntry) -> Result<UpsertOutcome, ValidationError> {
        self.upsert_with(&Validator::default(), candidate)
    }

    pub fn upsert_with(
        &self,
        validator: &Validator,
        candidate: ExampleEntry,
    ) -> Result<UpsertOutcome, ValidationError> {
        let validated = validator.validate(&candidate)?;
        Ok(self.write(|c| c.apply(validated)))
    }

    pub fn delete(&self, service: &str, method: &str) -> Option<ExampleEntry> {
        self.write(|c| c.delete(service, method))
    }

    pub fn validate_all(&self) -> Vec<EntryWarnings> {
        self.read(Catalog::validate_all)
    }

    /// Clone of the current catalog, e.g. for saving.
    pub fn snapshot(&self) -> Catalog {
        self.read(Catalog::clone)
    }

    // Every mutation is validated first and applied as a single assignment
    // or push, so a poisoned lock still guards a consistent catalog.
    fn read<T>(&self, f: impl FnOnce(&Catalog) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&*guard)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Catalog) -> T) -> T {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }
}
