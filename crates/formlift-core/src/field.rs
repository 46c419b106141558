//! The `Field` record and its control metadata.
//!
//! A `Field` represents one form input or option group recovered from the
//! document text. Its `control` carries the widget-level detail: input
//! subtype, option list, multi-select flag, and an optional conditional
//! link to a parent field.

use serde::{Deserialize, Serialize};

/// Semantic type of a form field.
///
/// This is the closed vocabulary downstream renderers switch on. Values
/// outside it are defects, not extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free-text entry (see [`InputKind`] for the subtype).
    Input,
    /// Date entry.
    Date,
    /// Single-choice option group (Yes/No, gender, etc.).
    Radio,
    /// Option list rendered as a dropdown or checkbox group.
    Dropdown,
    /// Consent / acknowledgment text block.
    Terms,
    /// Signature capture.
    Signature,
    /// US state selector.
    States,
}

impl FieldType {
    /// True for types whose control must carry at least one option.
    #[must_use]
    pub fn requires_options(self) -> bool {
        matches!(self, FieldType::Radio | FieldType::Dropdown)
    }
}

/// Input subtype, inferred from label keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Name,
    Phone,
    Email,
    Ssn,
    Zip,
}

/// One selectable option within a radio/dropdown field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Stable machine value, unique within the field.
    pub value: String,
    /// Human-readable label as it appeared in the document.
    pub label: String,
    /// True when the source checkbox was already marked.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub checked: bool,
}

impl FieldOption {
    /// Build an option from a label, deriving the value as its slug.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        FieldOption {
            value: crate::slug::slugify(label),
            label: label.to_string(),
            checked: false,
        }
    }
}

/// Dependency marking a field as relevant only when another field holds a
/// specific value. Resolved by key lookup at render time, never an object
/// pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalLink {
    pub parent_key: String,
    pub expected_value: String,
}

/// Widget-level metadata attached to a [`Field`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldControl {
    /// Input subtype; only meaningful for `input` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<InputKind>,
    /// Options for radio/dropdown fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    /// True when multiple options may be selected.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multi: bool,
    /// Present when the field only applies conditionally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionalLink>,
    /// True for merged condition-list dropdowns (allergies, conditions).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub condition_list: bool,
}

/// One structured output record representing a single form input or option
/// group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Unique slug identifying the field within the document.
    pub key: String,
    /// Display title, as extracted or canonicalized.
    pub title: String,
    /// Section bucket; `None` until inference or canonicalization assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Semantic type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Widget metadata.
    #[serde(default, skip_serializing_if = "FieldControl::is_empty")]
    pub control: FieldControl,
    /// Full body text for `terms` fields; absent otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl FieldControl {
    /// True when no metadata is present (lets serde omit the whole object).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.options.is_empty()
            && !self.multi
            && self.condition.is_none()
            && !self.condition_list
    }
}

impl Field {
    /// Create a plain text input field.
    #[must_use]
    pub fn input(key: &str, title: &str) -> Self {
        Field {
            key: key.to_string(),
            title: title.to_string(),
            section: None,
            field_type: FieldType::Input,
            control: FieldControl::default(),
            text: None,
        }
    }

    /// Create a field of the given type with default control.
    #[must_use]
    pub fn new(key: &str, title: &str, field_type: FieldType) -> Self {
        Field {
            key: key.to_string(),
            title: title.to_string(),
            section: None,
            field_type,
            control: FieldControl::default(),
            text: None,
        }
    }

    /// Attach an option list, marking the field multi-select if requested.
    #[must_use]
    pub fn with_options(mut self, options: Vec<FieldOption>, multi: bool) -> Self {
        self.control.options = options;
        self.control.multi = multi;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_from_label_slugs_value() {
        let opt = FieldOption::from_label("Heart Disease");
        assert_eq!(opt.value, "heart_disease");
        assert_eq!(opt.label, "Heart Disease");
        assert!(!opt.checked, "options start unchecked");
    }

    #[test]
    fn test_empty_control_is_omitted_from_json() {
        let field = Field::input("first_name", "First Name");
        let json = serde_json::to_string(&field).unwrap();
        assert!(
            !json.contains("control"),
            "empty control should be skipped: {json}"
        );
        assert!(json.contains("\"type\":\"input\""));
    }

    #[test]
    fn test_conditional_link_round_trips() {
        let mut field = Field::input("allergic_detail", "If yes, please explain");
        field.control.condition = Some(ConditionalLink {
            parent_key: "allergic".to_string(),
            expected_value: "yes".to_string(),
        });
        let json = serde_json::to_string(&field).unwrap();
        let back: Field = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_requires_options() {
        assert!(FieldType::Radio.requires_options());
        assert!(FieldType::Dropdown.requires_options());
        assert!(!FieldType::Input.requires_options());
        assert!(!FieldType::Terms.requires_options());
    }
}
