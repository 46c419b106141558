//! # Formlift Extract - Text to Form Fields
//!
//! Recovers structured form fields from layout-flattened text: the raw
//! lines an upstream text producer emits once a document's visual layout
//! has been serialized away. Everything here works from whitespace,
//! punctuation, and content heuristics alone.
//!
//! Pipeline stages, strictly downstream:
//!
//! 1. [`normalize`] - glyph canonicalization, boilerplate scrubbing,
//!    soft-wrap coalescing
//! 2. [`classify`] - per-line labels (heading, blank field, checkbox line,
//!    grid row candidate, prose, junk)
//! 3. [`grid`] - multi-column checkbox grid detection
//! 4. [`extract`] - field synthesis from classified lines and grid blocks
//!
//! ```rust
//! use formlift_extract::extract_fields;
//!
//! let text = "PATIENT INFORMATION\nFirst Name: ______  Last Name: ______\n";
//! let fields = extract_fields(text);
//! assert_eq!(fields.len(), 2);
//! ```

pub mod classify;
pub mod extract;
pub mod grid;
pub mod line;
pub mod normalize;

pub use classify::{classify, LineClass};
pub use extract::{extract_fields, FieldExtractor};
pub use grid::{detect_grid, GridBlock, GridItem};
pub use line::{CheckboxToken, Line};
pub use normalize::normalize_lines;
