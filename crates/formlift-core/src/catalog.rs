//! Canonical field definitions.
//!
//! A [`CatalogEntry`] is a pre-defined template a locally extracted field
//! can be standardized against: it carries the canonical key, title, type,
//! control defaults, known aliases, and a section hint. Entries are loaded
//! once and immutable afterwards, which makes the catalog safe to share
//! across parallel per-document workers.

use serde::{Deserialize, Serialize};

use crate::field::{FieldOption, FieldType, InputKind};

/// Default control metadata declared by a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogControl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<InputKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multi: bool,
}

/// A canonical, read-only field template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Canonical key assigned to matching fields.
    pub key: String,
    /// Canonical display title.
    pub title: String,
    /// Canonical type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Default control metadata (overridden by non-empty extracted options).
    #[serde(default, skip_serializing_if = "CatalogControl::is_empty")]
    pub control: CatalogControl,
    /// Alternate titles this entry matches, compared case-insensitively.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Section the canonical field belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl CatalogControl {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.options.is_empty() && !self.multi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_deserializes_from_minimal_json() {
        let entry: CatalogEntry = serde_json::from_str(
            r#"{"key":"first_name","title":"First Name","type":"input"}"#,
        )
        .unwrap();
        assert_eq!(entry.key, "first_name");
        assert_eq!(entry.field_type, FieldType::Input);
        assert!(entry.aliases.is_empty());
        assert!(entry.control.is_empty());
    }

    #[test]
    fn test_entry_with_options() {
        let entry: CatalogEntry = serde_json::from_str(
            r#"{
                "key": "gender",
                "title": "Gender",
                "type": "radio",
                "control": {"options": [
                    {"value": "male", "label": "Male"},
                    {"value": "female", "label": "Female"}
                ]},
                "aliases": ["sex"],
                "section": "patient"
            }"#,
        )
        .unwrap();
        assert_eq!(entry.control.options.len(), 2);
        assert_eq!(entry.section.as_deref(), Some("patient"));
    }
}
