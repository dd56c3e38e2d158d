//! Answer payload model
//!
//! Submitted values are dynamically shaped: scalars, checkbox lists, or
//! repeater group lists. `AnswerValue` models them as an explicit tagged
//! union so every consumer dispatches on shape instead of coercing ad hoc.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Upload error code denoting a successful upload.
pub const UPLOAD_OK: i64 = 0;

/// Submitted answers keyed by field key.
pub type AnswerMap = HashMap<String, AnswerValue>;

/// Upload metadata keyed by field key or composite repeater key.
pub type FileMap = HashMap<String, FileMetadata>;

/// One submitted answer value.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    Null,
    /// Scalar input; numbers and booleans arrive in string form
    Scalar(String),
    /// Checkbox selections or repeater groups
    List(Vec<AnswerValue>),
    /// One repeater group, keyed by child field key
    Group(HashMap<String, AnswerValue>),
}

impl AnswerValue {
    /// Emptiness test used by the required-field gate: null, the empty
    /// string, or an empty list. Groups are never considered empty.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Null => true,
            AnswerValue::Scalar(s) => s.is_empty(),
            AnswerValue::List(items) => items.is_empty(),
            AnswerValue::Group(_) => false,
        }
    }

    pub fn as_list(&self) -> Option<&[AnswerValue]> {
        match self {
            AnswerValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&HashMap<String, AnswerValue>> {
        match self {
            AnswerValue::Group(members) => Some(members),
            _ => None,
        }
    }

    /// String form of the value: scalars verbatim, lists and groups
    /// JSON-serialized, null empty. Group keys serialize sorted so the
    /// form is deterministic.
    pub fn text(&self) -> String {
        match self {
            AnswerValue::Null => String::new(),
            AnswerValue::Scalar(s) => s.clone(),
            other => other.to_json().to_string(),
        }
    }

    /// JSON rendering of the value
    pub fn to_json(&self) -> Value {
        match self {
            AnswerValue::Null => Value::Null,
            AnswerValue::Scalar(s) => Value::String(s.clone()),
            AnswerValue::List(items) => {
                Value::Array(items.iter().map(AnswerValue::to_json).collect())
            }
            AnswerValue::Group(members) => {
                let mut keys: Vec<&String> = members.keys().collect();
                keys.sort();
                let mut map = serde_json::Map::new();
                for key in keys {
                    if let Some(v) = members.get(key) {
                        map.insert(key.clone(), v.to_json());
                    }
                }
                Value::Object(map)
            }
        }
    }
}

impl From<&Value> for AnswerValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => AnswerValue::Null,
            Value::String(s) => AnswerValue::Scalar(s.clone()),
            Value::Number(n) => AnswerValue::Scalar(n.to_string()),
            Value::Bool(b) => AnswerValue::Scalar(b.to_string()),
            Value::Array(items) => {
                AnswerValue::List(items.iter().map(AnswerValue::from).collect())
            }
            Value::Object(map) => AnswerValue::Group(
                map.iter()
                    .map(|(k, v)| (k.clone(), AnswerValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for AnswerValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(AnswerValue::from(&value))
    }
}

/// Metadata for one uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    pub temp_location: String,
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub size: u64,
}

impl FileMetadata {
    /// Whether the upload completed successfully
    pub fn is_uploaded(&self) -> bool {
        self.error_code == UPLOAD_OK
    }
}
