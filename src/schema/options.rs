//! Option list normalization
//!
//! Stored option payloads arrive in several shapes: a bare scalar, a
//! value→label map, a list of scalars, or a list of value/label maps.
//! The normalizer canonicalizes all of them into an ordered
//! `Vec<ChoiceOption>`.
//!
//! Rules:
//! - null and empty string normalize to an empty list
//! - scalars become a single mirrored value/label pair
//! - map entries and list elements are trimmed; fully-empty entries are
//!   dropped, one-sided entries mirror the non-empty side
//! - insertion order is preserved, duplicates are kept

use serde_json::Value;

use super::types::ChoiceOption;

/// Canonicalizes heterogeneous raw option payloads.
pub struct OptionsNormalizer;

impl OptionsNormalizer {
    /// Normalizes a decoded option payload into an ordered option list.
    ///
    /// Unsupported shapes normalize to an empty list; this never fails.
    pub fn normalize(raw: &Value) -> Vec<ChoiceOption> {
        match raw {
            Value::Null => Vec::new(),
            Value::String(s) => Self::from_scalar(s),
            Value::Bool(b) => Self::from_scalar(&b.to_string()),
            Value::Number(n) => Self::from_scalar(&n.to_string()),
            Value::Object(map) => {
                let mut out = Vec::new();
                for (key, label) in map {
                    let value = key.trim();
                    let label = scalar_text(label);
                    let label = label.trim();
                    if value.is_empty() || label.is_empty() {
                        continue;
                    }
                    out.push(ChoiceOption::new(value, label));
                }
                out
            }
            Value::Array(items) => {
                let mut out = Vec::new();
                for item in items {
                    if let Some(opt) = Self::from_list_item(item) {
                        out.push(opt);
                    }
                }
                out
            }
        }
    }

    /// A bare scalar becomes a single mirrored pair; empty yields nothing.
    fn from_scalar(raw: &str) -> Vec<ChoiceOption> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        vec![ChoiceOption::new(trimmed, trimmed)]
    }

    fn from_list_item(item: &Value) -> Option<ChoiceOption> {
        match item {
            Value::Object(map) => {
                let value = map.get("value").map(scalar_text).unwrap_or_default();
                let label = map.get("label").map(scalar_text).unwrap_or_default();
                let value = value.trim();
                let label = label.trim();
                match (value.is_empty(), label.is_empty()) {
                    (true, true) => None,
                    // mirror the non-empty side
                    (true, false) => Some(ChoiceOption::new(label, label)),
                    (false, true) => Some(ChoiceOption::new(value, value)),
                    (false, false) => Some(ChoiceOption::new(value, label)),
                }
            }
            Value::Array(_) | Value::Null => None,
            scalar => {
                let text = scalar_text(scalar);
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(ChoiceOption::new(trimmed, trimmed))
                }
            }
        }
    }
}

/// String form of a scalar JSON value; non-scalars yield an empty string
/// and are therefore dropped by the trim checks above.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
