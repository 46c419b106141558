//! # Formlift Pipeline - End-to-End Extraction
//!
//! Wires the stages together: normalize/classify/extract
//! (`formlift-extract`), canonicalize against the catalog
//! (`formlift-catalog`), then consolidate. The result is a deterministic,
//! idempotent list of [`Field`] records ready for rendering or ingestion.
//!
//! ```rust
//! use formlift_pipeline::FormExtractor;
//!
//! let extractor = FormExtractor::new();
//! let fields = extractor.extract("First Name: ______\nLast Name: ______\n");
//! assert_eq!(fields.len(), 2);
//! ```
//!
//! Batch processing across documents is an embarrassingly parallel map:
//! the catalog and section configuration are immutable after construction
//! and shared across rayon workers.

pub mod consolidate;
pub mod sections;

use rayon::prelude::*;

use formlift_catalog::{canonicalize_all, Catalog};
use formlift_core::Field;
use formlift_extract::FieldExtractor;

pub use consolidate::Consolidator;
pub use sections::{SectionConfig, SectionVocabulary};

/// The pipeline front door: extraction, canonicalization, and
/// consolidation behind one call.
pub struct FormExtractor<'c> {
    catalog: &'c Catalog,
    extractor: FieldExtractor,
    consolidator: Consolidator,
}

impl FormExtractor<'static> {
    /// Pipeline over the built-in catalog and default section config.
    #[must_use]
    pub fn new() -> Self {
        FormExtractor::with_catalog(Catalog::builtin())
    }
}

impl Default for FormExtractor<'static> {
    fn default() -> Self {
        FormExtractor::new()
    }
}

impl<'c> FormExtractor<'c> {
    /// Pipeline over a caller-supplied catalog.
    #[must_use]
    pub fn with_catalog(catalog: &'c Catalog) -> Self {
        FormExtractor {
            catalog,
            extractor: FieldExtractor::new(),
            consolidator: Consolidator::default(),
        }
    }

    /// Replace the section-inference configuration.
    #[must_use]
    pub fn with_sections(mut self, config: SectionConfig) -> Self {
        self.consolidator = Consolidator::new(config);
        self
    }

    /// Process one document's text into its final field list.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<Field> {
        let mut fields = self.extractor.extract(text);
        canonicalize_all(&mut fields, self.catalog);
        self.consolidator.consolidate(fields)
    }

    /// Process many documents in parallel. Output order follows input
    /// order; documents never share mutable state.
    #[must_use]
    pub fn extract_batch(&self, documents: &[String]) -> Vec<Vec<Field>> {
        documents.par_iter().map(|doc| self.extract(doc)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_canonicalizes_keys() {
        let extractor = FormExtractor::new();
        let fields = extractor.extract("DOB: ________\n");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].key, "date_of_birth", "alias resolves to canonical key");
    }

    #[test]
    fn test_batch_matches_single() {
        let extractor = FormExtractor::new();
        let doc = "First Name: ______\nLast Name: ______\n".to_string();
        let batch = extractor.extract_batch(&[doc.clone(), doc.clone()]);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], extractor.extract(&doc));
        assert_eq!(batch[0], batch[1]);
    }
}
