//! Submission flattening for export
//!
//! One forest walk builds an id→label index (children included); each
//! stored answer row is then keyed by its field label, with `[n]`
//! suffixes for repeated groups past the first. Later rows overwrite
//! earlier rows sharing a key.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::schema::FieldDefinition;

/// One persisted answer row of a stored submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRow {
    pub field_id: i64,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub repeat_index: i64,
}

/// A previously persisted submission, as its ordered answer rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSubmission {
    pub answers: Vec<AnswerRow>,
}

/// Flattens stored submissions into label→value maps.
pub struct ExportFlattener;

impl ExportFlattener {
    /// Flattens a stored submission against a schema forest.
    ///
    /// Rows for ids missing from the forest (e.g. a since-deleted field)
    /// fall back to a `field_<id>` label rather than being dropped.
    pub fn flatten(
        submission: &StoredSubmission,
        forest: &[FieldDefinition],
    ) -> BTreeMap<String, Option<String>> {
        let labels = Self::label_index(forest);
        let mut out = BTreeMap::new();

        for row in &submission.answers {
            let label = match labels.get(&row.field_id) {
                Some(label) => (*label).to_string(),
                None => format!("field_{}", row.field_id),
            };

            // the first repeated group exports unindexed
            let key = if row.repeat_index > 0 {
                format!("{}[{}]", label, row.repeat_index)
            } else {
                label
            };

            let value = match &row.file_path {
                Some(path) => Some(path.clone()),
                None => row.answer.clone(),
            };

            // last write wins, in input order
            out.insert(key, value);
        }

        out
    }

    /// Builds the id→label lookup in one walk over the forest.
    fn label_index(forest: &[FieldDefinition]) -> HashMap<i64, &str> {
        let mut labels = HashMap::new();
        for field in forest {
            labels.insert(field.id, field.label.as_str());
            for child in &field.children {
                labels.insert(child.id, child.label.as_str());
            }
        }
        labels
    }
}
