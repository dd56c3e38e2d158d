//! Typed access to decoded validation-rule maps
//!
//! Rules are stored as a free-form JSON object per field. This wrapper
//! exposes the recognized keys through typed accessors; both snake_case
//! and camelCase spellings of the length bounds are accepted, and numeric
//! bounds may arrive as JSON numbers or numeric strings.

use serde::Serialize;
use serde_json::{Map, Value};

/// Decoded validation-rule map for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationRules(Map<String, Value>);

impl ValidationRules {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Minimum character count (`min_length` / `minLength`)
    pub fn min_length(&self) -> Option<f64> {
        self.number(&["min_length", "minLength"])
    }

    /// Maximum character count (`max_length` / `maxLength`)
    pub fn max_length(&self) -> Option<f64> {
        self.number(&["max_length", "maxLength"])
    }

    /// Numeric lower bound, applied to number fields only
    pub fn min(&self) -> Option<f64> {
        self.number(&["min"])
    }

    /// Numeric upper bound, applied to number fields only
    pub fn max(&self) -> Option<f64> {
        self.number(&["max"])
    }

    /// Caller-supplied regex pattern, if any
    pub fn pattern(&self) -> Option<&str> {
        self.0.get("regex").and_then(Value::as_str)
    }

    /// First parseable numeric value among the given keys
    fn number(&self, keys: &[&str]) -> Option<f64> {
        for key in keys {
            match self.0.get(*key) {
                Some(Value::Number(n)) => {
                    if let Some(v) = n.as_f64() {
                        return Some(v);
                    }
                }
                Some(Value::String(s)) => {
                    if let Ok(v) = s.trim().parse::<f64>() {
                        return Some(v);
                    }
                }
                _ => {}
            }
        }
        None
    }
}
