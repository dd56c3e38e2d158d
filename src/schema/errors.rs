//! Recoverable schema-build anomalies
//!
//! The build never fails on malformed stored data: a field that carries a
//! broken payload degrades (no options, no rules) and a child that cannot
//! be attached is dropped. Each such recovery is reported as a warning
//! value so callers can log it; warnings are data, never errors.

use thiserror::Error;

/// A recoverable anomaly encountered while building a schema forest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaWarning {
    /// Stored option payload was not valid JSON
    #[error("field {field_id}: discarded malformed options payload")]
    OptionsDecode { field_id: i64 },

    /// Stored validation rules were not a JSON object
    #[error("field {field_id}: discarded malformed validation rules")]
    RulesDecode { field_id: i64 },

    /// A child row referenced a parent id that does not exist
    #[error("field {field_id}: dropped, parent {parent_field_id} not found")]
    OrphanChild { field_id: i64, parent_field_id: i64 },

    /// A child row claimed nesting deeper than two levels and was
    /// re-attached to its top-level ancestor
    #[error("field {field_id}: re-attached to top-level ancestor {ancestor_id}")]
    DepthClamped { field_id: i64, ancestor_id: i64 },
}

impl SchemaWarning {
    /// Event name for structured logging
    pub fn event(&self) -> &'static str {
        match self {
            SchemaWarning::OptionsDecode { .. } => "SCHEMA_OPTIONS_DISCARDED",
            SchemaWarning::RulesDecode { .. } => "SCHEMA_RULES_DISCARDED",
            SchemaWarning::OrphanChild { .. } => "SCHEMA_ORPHAN_DROPPED",
            SchemaWarning::DepthClamped { .. } => "SCHEMA_DEPTH_CLAMPED",
        }
    }

    /// Id of the field the warning is about
    pub fn field_id(&self) -> i64 {
        match self {
            SchemaWarning::OptionsDecode { field_id }
            | SchemaWarning::RulesDecode { field_id }
            | SchemaWarning::OrphanChild { field_id, .. }
            | SchemaWarning::DepthClamped { field_id, .. } => *field_id,
        }
    }
}
