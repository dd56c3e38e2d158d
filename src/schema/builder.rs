//! Schema forest construction from flat stored rows
//!
//! Two-pass build: an arena pass indexes every definition by id (flat map,
//! no pointers), then a linking pass attaches repeater children to their
//! parents. Row order never matters; children and the top-level forest are
//! always emitted sorted by (order_index asc, id asc).
//!
//! Malformed input degrades, it never aborts:
//! - broken JSON payloads leave the field without options/rules
//! - a child whose parent id is unknown is dropped
//! - a chain deeper than two levels is re-attached to its top-level ancestor

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::validation::ValidationRules;

use super::errors::SchemaWarning;
use super::options::OptionsNormalizer;
use super::types::{ChoiceOption, FieldDefinition, FieldType, RawFieldRow, SourceType};

/// Caller-supplied context for dynamic option sources.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    /// Substituted for the stored options of every `departments` field
    pub department_options: Option<Vec<ChoiceOption>>,
}

impl BuildContext {
    /// Context with no dynamic option sources
    pub fn empty() -> Self {
        Self::default()
    }

    /// Context carrying injected department options
    pub fn with_departments(options: Vec<ChoiceOption>) -> Self {
        Self {
            department_options: Some(options),
        }
    }
}

/// A built forest together with the anomalies recovered along the way.
#[derive(Debug)]
pub struct SchemaBuild {
    /// Top-level forest, ordered by (order_index asc, id asc)
    pub fields: Vec<FieldDefinition>,
    /// Recoverable anomalies, for caller-side logging
    pub warnings: Vec<SchemaWarning>,
}

/// Converts flat stored field rows into a depth-2 definition forest.
pub struct SchemaBuilder;

/// Where a child row ends up after resolving its parent chain.
enum Attachment {
    /// Declared parent is a top-level field
    Direct { parent: i64 },
    /// Declared parent was itself a child; re-attached to the ancestor
    Clamped { ancestor: i64 },
    /// Parent chain is broken (missing link or cycle); row is dropped
    Orphan { declared: i64 },
}

impl SchemaBuilder {
    /// Builds the top-level forest, discarding warnings.
    pub fn build(rows: &[RawFieldRow], ctx: &BuildContext) -> Vec<FieldDefinition> {
        Self::build_detailed(rows, ctx).fields
    }

    /// Builds the forest and reports every recovered anomaly.
    ///
    /// Never fails on malformed input; the worst case is a field without
    /// options/rules or a dropped orphan child.
    pub fn build_detailed(rows: &[RawFieldRow], ctx: &BuildContext) -> SchemaBuild {
        let mut warnings = Vec::new();

        // Pass 1: arena of definitions indexed by id. A duplicated id keeps
        // the later row, matching a keyed fetch.
        let mut arena: HashMap<i64, FieldDefinition> = HashMap::new();
        for row in rows {
            if row.id <= 0 {
                continue;
            }
            arena.insert(row.id, Self::decode_row(row, ctx, &mut warnings));
        }

        // Pass 2: plan attachments in deterministic id order.
        let mut child_ids: Vec<i64> = arena
            .values()
            .filter(|d| d.parent_field_id.is_some())
            .map(|d| d.id)
            .collect();
        child_ids.sort_unstable();

        let mut pending: HashMap<i64, Vec<i64>> = HashMap::new();
        for &id in &child_ids {
            let Some(declared) = arena.get(&id).and_then(|d| d.parent_field_id) else {
                continue;
            };
            match Self::resolve_attachment(&arena, id, declared) {
                Attachment::Direct { parent } => {
                    pending.entry(parent).or_default().push(id);
                }
                Attachment::Clamped { ancestor } => {
                    warnings.push(SchemaWarning::DepthClamped {
                        field_id: id,
                        ancestor_id: ancestor,
                    });
                    pending.entry(ancestor).or_default().push(id);
                }
                Attachment::Orphan { declared } => {
                    warnings.push(SchemaWarning::OrphanChild {
                        field_id: id,
                        parent_field_id: declared,
                    });
                }
            }
        }

        // Detach every child definition; orphans fall away here.
        let mut detached: HashMap<i64, FieldDefinition> = HashMap::new();
        for id in &child_ids {
            if let Some(def) = arena.remove(id) {
                detached.insert(*id, def);
            }
        }

        // Attach children sorted by (order_index, id).
        let mut parent_ids: Vec<i64> = pending.keys().copied().collect();
        parent_ids.sort_unstable();
        for pid in parent_ids {
            let Some(mut kids) = pending.remove(&pid) else {
                continue;
            };
            kids.sort_by_key(|id| {
                let order = detached.get(id).map(|d| d.order_index).unwrap_or_default();
                (order, *id)
            });
            if let Some(parent) = arena.get_mut(&pid) {
                for kid in kids {
                    if let Some(def) = detached.remove(&kid) {
                        parent.children.push(def);
                    }
                }
            }
        }

        let mut fields: Vec<FieldDefinition> = arena.into_values().collect();
        fields.sort_by_key(|d| (d.order_index, d.id));

        SchemaBuild { fields, warnings }
    }

    /// Decodes one stored row into a definition, swallowing payload errors.
    fn decode_row(
        row: &RawFieldRow,
        ctx: &BuildContext,
        warnings: &mut Vec<SchemaWarning>,
    ) -> FieldDefinition {
        let field_type = FieldType::parse(&row.field_type);
        let source_type = SourceType::parse(&row.source_type);

        let mut options = match &row.field_options {
            None => None,
            Some(payload) => match serde_json::from_str::<Value>(payload) {
                Ok(decoded) => Some(OptionsNormalizer::normalize(&decoded)),
                Err(_) => {
                    warnings.push(SchemaWarning::OptionsDecode { field_id: row.id });
                    None
                }
            },
        };

        // The injected department list wins regardless of stored options.
        if source_type == SourceType::Departments {
            options = ctx.department_options.clone();
        }

        let validation_rules = match &row.validation_rules {
            None => None,
            Some(payload) => match serde_json::from_str::<Value>(payload) {
                Ok(Value::Object(map)) => Some(ValidationRules::new(map)),
                Ok(_) | Err(_) => {
                    warnings.push(SchemaWarning::RulesDecode { field_id: row.id });
                    None
                }
            },
        };

        FieldDefinition {
            id: row.id,
            form_id: row.form_id,
            field_type,
            label: row.label.clone(),
            placeholder: row.placeholder.clone(),
            is_required: row.is_required != 0,
            is_active: row.is_active != 0,
            source_type,
            parent_field_id: row.parent_field_id,
            field_key: row.field_key.clone(),
            order_index: row.order_index,
            options,
            validation_rules,
            helper_text: row.helper_text.clone(),
            children: Vec::new(),
        }
    }

    /// Climbs the parent chain of a child row to its top-level ancestor.
    ///
    /// A missing link or a cycle anywhere in the chain orphans the row.
    fn resolve_attachment(
        arena: &HashMap<i64, FieldDefinition>,
        child_id: i64,
        declared: i64,
    ) -> Attachment {
        let mut seen = HashSet::from([child_id]);
        let mut parent_id = declared;
        let mut climbed = false;
        loop {
            if !seen.insert(parent_id) {
                return Attachment::Orphan { declared };
            }
            match arena.get(&parent_id) {
                None => return Attachment::Orphan { declared },
                Some(parent) => match parent.parent_field_id {
                    None => {
                        return if climbed {
                            Attachment::Clamped {
                                ancestor: parent_id,
                            }
                        } else {
                            Attachment::Direct { parent: parent_id }
                        }
                    }
                    Some(grand) => {
                        climbed = true;
                        parent_id = grand;
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, parent: Option<i64>, order: i64) -> RawFieldRow {
        RawFieldRow {
            id,
            form_id: 1,
            field_type: "text".to_string(),
            label: format!("Field {}", id),
            placeholder: None,
            is_required: 0,
            is_active: 1,
            source_type: "static".to_string(),
            parent_field_id: parent,
            field_key: format!("field_{}", id),
            order_index: order,
            field_options: None,
            validation_rules: None,
            helper_text: None,
        }
    }

    #[test]
    fn test_top_level_sorted_by_order_then_id() {
        let rows = vec![row(3, None, 2), row(1, None, 2), row(2, None, 1)];
        let forest = SchemaBuilder::build(&rows, &BuildContext::empty());
        let ids: Vec<i64> = forest.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_children_attached_and_sorted() {
        let mut parent = row(1, None, 0);
        parent.field_type = "repeater".to_string();
        let rows = vec![row(5, Some(1), 1), parent, row(4, Some(1), 0)];

        let forest = SchemaBuilder::build(&rows, &BuildContext::empty());
        assert_eq!(forest.len(), 1);
        let kids: Vec<i64> = forest[0].children.iter().map(|c| c.id).collect();
        assert_eq!(kids, vec![4, 5]);
    }

    #[test]
    fn test_orphan_child_dropped_with_warning() {
        let rows = vec![row(1, None, 0), row(2, Some(99), 0)];
        let build = SchemaBuilder::build_detailed(&rows, &BuildContext::empty());

        assert_eq!(build.fields.len(), 1);
        assert_eq!(build.fields[0].id, 1);
        assert_eq!(
            build.warnings,
            vec![SchemaWarning::OrphanChild {
                field_id: 2,
                parent_field_id: 99
            }]
        );
    }

    #[test]
    fn test_deep_chain_clamped_to_ancestor() {
        // 3 claims 2 as parent, but 2 is itself a child of 1.
        let rows = vec![row(1, None, 0), row(2, Some(1), 0), row(3, Some(2), 1)];
        let build = SchemaBuilder::build_detailed(&rows, &BuildContext::empty());

        assert_eq!(build.fields.len(), 1);
        let kids: Vec<i64> = build.fields[0].children.iter().map(|c| c.id).collect();
        assert_eq!(kids, vec![2, 3]);
        assert!(build
            .warnings
            .contains(&SchemaWarning::DepthClamped {
                field_id: 3,
                ancestor_id: 1
            }));
    }

    #[test]
    fn test_parent_cycle_orphans_both() {
        let rows = vec![row(1, Some(2), 0), row(2, Some(1), 0)];
        let build = SchemaBuilder::build_detailed(&rows, &BuildContext::empty());

        assert!(build.fields.is_empty());
        assert_eq!(build.warnings.len(), 2);
    }

    #[test]
    fn test_rows_with_non_positive_id_skipped() {
        let rows = vec![row(0, None, 0), row(-3, None, 0), row(1, None, 0)];
        let forest = SchemaBuilder::build(&rows, &BuildContext::empty());
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, 1);
    }

    #[test]
    fn test_malformed_options_swallowed() {
        let mut bad = row(1, None, 0);
        bad.field_options = Some("{not json".to_string());
        let build = SchemaBuilder::build_detailed(&[bad], &BuildContext::empty());

        assert!(build.fields[0].options.is_none());
        assert_eq!(
            build.warnings,
            vec![SchemaWarning::OptionsDecode { field_id: 1 }]
        );
    }

    #[test]
    fn test_non_object_rules_swallowed() {
        let mut bad = row(1, None, 0);
        bad.validation_rules = Some("[1,2]".to_string());
        let build = SchemaBuilder::build_detailed(&[bad], &BuildContext::empty());

        assert!(build.fields[0].validation_rules.is_none());
        assert_eq!(
            build.warnings,
            vec![SchemaWarning::RulesDecode { field_id: 1 }]
        );
    }

    #[test]
    fn test_stored_options_decoded_and_normalized() {
        let mut field = row(1, None, 0);
        field.field_type = "select".to_string();
        field.field_options = Some(r#"{"a":"Alpha","b":"Beta"}"#.to_string());
        let forest = SchemaBuilder::build(&[field], &BuildContext::empty());

        let opts = forest[0].options.as_ref().unwrap();
        assert_eq!(opts.len(), 2);
        assert_eq!(opts[0], ChoiceOption::new("a", "Alpha"));
    }

    #[test]
    fn test_departments_override_stored_options() {
        let mut field = row(1, None, 0);
        field.field_type = "select".to_string();
        field.source_type = "departments".to_string();
        field.field_options = Some(r#"["stale"]"#.to_string());

        let ctx = BuildContext::with_departments(vec![ChoiceOption::new("hr", "HR")]);
        let forest = SchemaBuilder::build(&[field], &ctx);

        assert_eq!(
            forest[0].options.as_deref(),
            Some(&[ChoiceOption::new("hr", "HR")][..])
        );
    }

    #[test]
    fn test_departments_without_context_clears_options() {
        let mut field = row(1, None, 0);
        field.source_type = "departments".to_string();
        field.field_options = Some(r#"["stale"]"#.to_string());

        let forest = SchemaBuilder::build(&[field], &BuildContext::empty());
        assert!(forest[0].options.is_none());
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut parent = row(1, None, 0);
        parent.field_type = "repeater".to_string();
        let rows = vec![parent, row(2, Some(1), 0), row(3, None, 1)];

        let a = SchemaBuilder::build(&rows, &BuildContext::empty());
        let b = SchemaBuilder::build(&rows, &BuildContext::empty());
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn test_flag_conversion() {
        let mut required = row(1, None, 0);
        required.is_required = 1;
        required.is_active = 0;
        let forest = SchemaBuilder::build(&[required], &BuildContext::empty());
        assert!(forest[0].is_required);
        assert!(!forest[0].is_active);
    }
}
