//! # Formlift Core - Form Field Data Model
//!
//! Shared types for the formlift extraction pipeline: the [`Field`] record
//! that every downstream consumer receives, the [`CatalogEntry`] template
//! used for canonicalization, and the error type shared across crates.
//!
//! ## Quick Start
//!
//! ```rust
//! use formlift_core::{Field, FieldType};
//!
//! let field = Field::input("first_name", "First Name");
//! assert_eq!(field.field_type, FieldType::Input);
//! assert_eq!(field.key, "first_name");
//! ```
//!
//! A `Field` is created by the extractor, possibly rewritten by the
//! canonicalizer, merged or re-sectioned by the consolidator, and immutable
//! thereafter. All types serialize with `serde` using lowercase tags so the
//! JSON output matches the schema downstream renderers expect.

pub mod catalog;
pub mod error;
pub mod field;
pub mod section;
pub mod slug;

pub use catalog::{CatalogControl, CatalogEntry};
pub use error::{FormliftError, Result};
pub use field::{ConditionalLink, Field, FieldControl, FieldOption, FieldType, InputKind};
pub use section::{section_rank, SECTION_ORDER};
pub use slug::{child_key, slugify};
