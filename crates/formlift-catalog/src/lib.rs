//! # Formlift Catalog - Canonical Field Templates
//!
//! Maps locally extracted fields onto a catalog of known field definitions
//! so that every intake form, whatever its wording, yields the same keys
//! and types for the same concepts.
//!
//! Matching is an ordered chain of pure matchers (exact key, exact title,
//! alias, fuzzy title), tried in priority order:
//!
//! ```rust
//! use formlift_catalog::Catalog;
//!
//! let catalog = Catalog::builtin();
//! let entry = catalog.find("dob", "DOB").expect("alias match");
//! assert_eq!(entry.key, "date_of_birth");
//! ```
//!
//! The catalog is loaded once and immutable afterwards, so it can be shared
//! freely across parallel per-document workers.

pub mod canonical;
pub mod matcher;

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use formlift_core::{CatalogEntry, FormliftError, Result};

use matcher::{default_matchers, Matcher};

pub use canonical::{canonicalize, canonicalize_all};

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_json(include_str!("../data/catalog.json"))
        .expect("embedded catalog is valid JSON")
});

/// A read-only set of canonical field definitions plus lookup indexes.
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_key: HashMap<String, usize>,
    by_title: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
    matchers: Vec<Box<dyn Matcher>>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl Catalog {
    /// The built-in catalog of common intake-form fields.
    #[must_use]
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Build a catalog from entries, validating key uniqueness.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut by_key = HashMap::new();
        let mut by_title = HashMap::new();
        let mut by_alias = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            if entry.key.is_empty() {
                return Err(FormliftError::InvalidCatalog(format!(
                    "entry {idx} has an empty key"
                )));
            }
            if by_key.insert(entry.key.clone(), idx).is_some() {
                return Err(FormliftError::InvalidCatalog(format!(
                    "duplicate key `{}`",
                    entry.key
                )));
            }
            // First declaration wins for title and alias collisions.
            by_title.entry(entry.title.to_lowercase()).or_insert(idx);
            for alias in &entry.aliases {
                by_alias.entry(alias.to_lowercase()).or_insert(idx);
            }
        }
        Ok(Catalog {
            entries,
            by_key,
            by_title,
            by_alias,
            matchers: default_matchers(),
        })
    }

    /// Parse a catalog from a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Catalog::from_entries(entries)
    }

    /// Load a catalog from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Catalog::from_json(&data)
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact key lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.by_key.get(key).map(|&idx| &self.entries[idx])
    }

    /// Case-insensitive exact title lookup.
    #[must_use]
    pub fn get_by_title(&self, title: &str) -> Option<&CatalogEntry> {
        self.by_title
            .get(&title.to_lowercase())
            .map(|&idx| &self.entries[idx])
    }

    /// Case-insensitive alias lookup.
    #[must_use]
    pub fn get_by_alias(&self, title: &str) -> Option<&CatalogEntry> {
        self.by_alias
            .get(&title.to_lowercase())
            .map(|&idx| &self.entries[idx])
    }

    /// Find the canonical entry for an extracted (key, title), trying each
    /// matcher in priority order. Pure with respect to catalog state.
    #[must_use]
    pub fn find(&self, key: &str, title: &str) -> Option<&CatalogEntry> {
        self.matchers
            .iter()
            .find_map(|matcher| matcher.find(self, key, title))
    }
}
