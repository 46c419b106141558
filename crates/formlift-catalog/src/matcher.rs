//! The matcher chain.
//!
//! Each matcher is a pure function of (key, title) and catalog state.
//! Keeping them as trait objects in a priority-ordered list keeps the chain
//! extensible without growing a nest of conditionals in `Catalog::find`.

use formlift_core::CatalogEntry;
use strsim::normalized_levenshtein;

use crate::Catalog;

/// Minimum normalized similarity for a fuzzy title match.
pub const FUZZY_THRESHOLD: f64 = 0.8;

/// One strategy for resolving an extracted (key, title) to a catalog entry.
pub trait Matcher: Send + Sync {
    fn name(&self) -> &'static str;
    fn find<'a>(&self, catalog: &'a Catalog, key: &str, title: &str)
        -> Option<&'a CatalogEntry>;
}

/// Exact key equality.
pub struct ExactKey;

impl Matcher for ExactKey {
    fn name(&self) -> &'static str {
        "exact-key"
    }

    fn find<'a>(&self, catalog: &'a Catalog, key: &str, _title: &str)
        -> Option<&'a CatalogEntry> {
        catalog.get(key)
    }
}

/// Case-insensitive exact title equality.
pub struct ExactTitle;

impl Matcher for ExactTitle {
    fn name(&self) -> &'static str {
        "exact-title"
    }

    fn find<'a>(&self, catalog: &'a Catalog, _key: &str, title: &str)
        -> Option<&'a CatalogEntry> {
        catalog.get_by_title(title)
    }
}

/// Alias-table membership, case-insensitive.
pub struct Alias;

impl Matcher for Alias {
    fn name(&self) -> &'static str {
        "alias"
    }

    fn find<'a>(&self, catalog: &'a Catalog, _key: &str, title: &str)
        -> Option<&'a CatalogEntry> {
        catalog.get_by_alias(title)
    }
}

/// Fuzzy title similarity at or above a threshold. Ties break to the higher
/// score, then to catalog declaration order.
pub struct FuzzyTitle {
    pub threshold: f64,
}

impl Matcher for FuzzyTitle {
    fn name(&self) -> &'static str {
        "fuzzy-title"
    }

    fn find<'a>(&self, catalog: &'a Catalog, _key: &str, title: &str)
        -> Option<&'a CatalogEntry> {
        let needle = title.to_lowercase();
        let mut best: Option<(f64, &CatalogEntry)> = None;
        for entry in catalog.entries() {
            let score = normalized_levenshtein(&needle, &entry.title.to_lowercase());
            if score < self.threshold {
                continue;
            }
            // Strict comparison keeps the earliest declaration on ties.
            if best.map_or(true, |(b, _)| score > b) {
                best = Some((score, entry));
            }
        }
        best.map(|(_, entry)| entry)
    }
}

/// The standard chain, in contract order.
#[must_use]
pub fn default_matchers() -> Vec<Box<dyn Matcher>> {
    vec![
        Box::new(ExactKey),
        Box::new(ExactTitle),
        Box::new(Alias),
        Box::new(FuzzyTitle {
            threshold: FUZZY_THRESHOLD,
        }),
    ]
}
