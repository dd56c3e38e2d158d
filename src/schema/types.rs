//! Field model: stored row shape and built definitions
//!
//! A form schema is a forest of `FieldDefinition` nodes built from flat
//! `RawFieldRow` storage rows. Definitions are read-only value objects;
//! they carry no lifecycle beyond the call that builds them.

use serde::{Deserialize, Serialize, Serializer};

use crate::validation::ValidationRules;

/// Field types dispatched by the validator.
///
/// The set is open: a stored type string with no dedicated handling is kept
/// verbatim in `Other` and falls through the generic value check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Email,
    Number,
    Select,
    Radio,
    Checkbox,
    File,
    Repeater,
    /// Any other stored type string, validated generically
    Other(String),
}

impl FieldType {
    /// Parses a stored type string. Unknown strings are preserved.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "text" => FieldType::Text,
            "email" => FieldType::Email,
            "number" => FieldType::Number,
            "select" => FieldType::Select,
            "radio" => FieldType::Radio,
            "checkbox" => FieldType::Checkbox,
            "file" => FieldType::File,
            "repeater" => FieldType::Repeater,
            other => FieldType::Other(other.to_string()),
        }
    }

    /// Returns the stored type string
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::File => "file",
            FieldType::Repeater => "repeater",
            FieldType::Other(s) => s,
        }
    }

    /// Whether the type carries an option list (select/radio/checkbox)
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Radio | FieldType::Checkbox
        )
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Origin of a field's option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceType {
    /// Options come from the stored JSON payload
    Static,
    /// Options are injected by the caller at build time
    Departments,
    /// Any other stored source string
    Other(String),
}

impl SourceType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "static" => SourceType::Static,
            "departments" => SourceType::Departments,
            other => SourceType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SourceType::Static => "static",
            SourceType::Departments => "departments",
            SourceType::Other(s) => s,
        }
    }
}

impl Serialize for SourceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One selectable value/label pair.
///
/// Both sides are non-empty after trimming; the normalizer enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Stored field row as supplied by the external collaborator.
///
/// Integer flags use the 0/1 convention of the storage layer; the JSON
/// payload columns arrive as raw strings and are decoded during the build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFieldRow {
    pub id: i64,
    pub form_id: i64,
    pub field_type: String,
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub is_required: i64,
    #[serde(default)]
    pub is_active: i64,
    #[serde(default = "default_source_type")]
    pub source_type: String,
    #[serde(default)]
    pub parent_field_id: Option<i64>,
    pub field_key: String,
    #[serde(default)]
    pub order_index: i64,
    #[serde(default)]
    pub field_options: Option<String>,
    #[serde(default)]
    pub validation_rules: Option<String>,
    #[serde(default)]
    pub helper_text: Option<String>,
}

fn default_source_type() -> String {
    "static".to_string()
}

/// A node in the built form schema forest.
///
/// Constructed fresh per build call from immutable storage rows; never
/// cached, never mutated after construction.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDefinition {
    pub id: i64,
    pub form_id: i64,
    pub field_type: FieldType,
    pub label: String,
    pub placeholder: Option<String>,
    pub is_required: bool,
    pub is_active: bool,
    pub source_type: SourceType,
    /// Non-null only for repeater children
    pub parent_field_id: Option<i64>,
    pub field_key: String,
    pub order_index: i64,
    pub options: Option<Vec<ChoiceOption>>,
    pub validation_rules: Option<ValidationRules>,
    pub helper_text: Option<String>,
    /// Owned children, ordered by (order_index asc, id asc)
    pub children: Vec<FieldDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_round_trip() {
        for raw in ["text", "email", "number", "select", "radio", "checkbox", "file", "repeater"] {
            assert_eq!(FieldType::parse(raw).as_str(), raw);
        }
    }

    #[test]
    fn test_field_type_open_set() {
        let ft = FieldType::parse("signature_pad");
        assert_eq!(ft, FieldType::Other("signature_pad".to_string()));
        assert_eq!(ft.as_str(), "signature_pad");
    }

    #[test]
    fn test_option_bearing_types() {
        assert!(FieldType::Select.has_options());
        assert!(FieldType::Radio.has_options());
        assert!(FieldType::Checkbox.has_options());
        assert!(!FieldType::Text.has_options());
        assert!(!FieldType::Repeater.has_options());
    }

    #[test]
    fn test_source_type_parse() {
        assert_eq!(SourceType::parse("static"), SourceType::Static);
        assert_eq!(SourceType::parse("departments"), SourceType::Departments);
        assert_eq!(
            SourceType::parse("branches"),
            SourceType::Other("branches".to_string())
        );
    }

    #[test]
    fn test_raw_row_deserializes_with_defaults() {
        let row: RawFieldRow = serde_json::from_value(serde_json::json!({
            "id": 1,
            "form_id": 7,
            "field_type": "text",
            "label": "Name",
            "field_key": "name"
        }))
        .unwrap();

        assert_eq!(row.is_required, 0);
        assert_eq!(row.source_type, "static");
        assert!(row.parent_field_id.is_none());
        assert!(row.field_options.is_none());
    }
}
