//! Submission validator
//!
//! Walks a schema forest in order and dispatches per field type:
//! repeaters walk their submitted groups with composite error keys,
//! file fields check the upload metadata bag, and everything else goes
//! through the generic value check (required gate, per-type format check,
//! then every configured rule).
//!
//! Malformed submitted data surfaces as validation errors on the
//! offending key; the walk itself never fails.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::schema::{FieldDefinition, FieldType};

use super::value::{AnswerMap, AnswerValue, FileMap};

/// Compile ceiling for caller-supplied rule patterns. Matching itself is
/// linear-time, so the size limit is the only guard needed.
const RULE_PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Outcome of validating one submission against one schema forest.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// Error messages per field key (or composite repeater key), in
    /// check order
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationResult {
    fn new() -> Self {
        Self {
            valid: true,
            errors: BTreeMap::new(),
        }
    }

    fn add(&mut self, key: &str, message: &str) {
        self.errors
            .entry(key.to_string())
            .or_default()
            .push(message.to_string());
    }

    fn finish(mut self) -> Self {
        self.valid = self.errors.is_empty();
        self
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Validates answer payloads against a built schema forest.
pub struct Validator;

impl Validator {
    /// Validates a submission.
    ///
    /// `answers` is the decoded submitted payload, `files` the upload
    /// metadata bag keyed by field key or composite repeater key.
    pub fn validate(
        answers: &AnswerMap,
        forest: &[FieldDefinition],
        files: &FileMap,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        for field in forest {
            match field.field_type {
                FieldType::Repeater => {
                    Self::check_repeater(field, answers.get(&field.field_key), files, &mut result);
                }
                FieldType::File => {
                    Self::check_file(field, &field.field_key, files, &mut result);
                }
                _ => {
                    let value = answers.get(&field.field_key).unwrap_or(&AnswerValue::Null);
                    Self::check_value(field, value, &field.field_key, &mut result);
                }
            }
        }

        result.finish()
    }

    /// Walks submitted repeater groups against the field's children.
    fn check_repeater(
        field: &FieldDefinition,
        value: Option<&AnswerValue>,
        files: &FileMap,
        result: &mut ValidationResult,
    ) {
        let value = value.unwrap_or(&AnswerValue::Null);

        if value.is_empty() {
            if field.is_required {
                result.add(&field.field_key, "At least one item is required.");
            }
            return;
        }

        let Some(groups) = value.as_list() else {
            result.add(&field.field_key, "Invalid repeater value.");
            return;
        };

        for (index, group) in groups.iter().enumerate() {
            let Some(members) = group.as_group() else {
                result.add(&format!("{}.{}", field.field_key, index), "Invalid item.");
                continue;
            };

            for child in &field.children {
                let composite = format!("{}.{}.{}", field.field_key, index, child.field_key);
                if child.field_type == FieldType::File {
                    Self::check_file(child, &composite, files, result);
                } else {
                    let value = members.get(&child.field_key).unwrap_or(&AnswerValue::Null);
                    Self::check_value(child, value, &composite, result);
                }
            }
        }
    }

    /// Checks one file field against the upload metadata bag.
    fn check_file(
        field: &FieldDefinition,
        key: &str,
        files: &FileMap,
        result: &mut ValidationResult,
    ) {
        match files.get(key) {
            None => {
                if field.is_required {
                    result.add(key, "File is required.");
                }
            }
            Some(meta) => {
                if !meta.is_uploaded() {
                    result.add(key, "Upload error.");
                }
            }
        }
    }

    /// Generic value check: required gate, per-type format check, then
    /// every configured rule. Rule violations accumulate; nothing here
    /// stops early.
    fn check_value(
        field: &FieldDefinition,
        value: &AnswerValue,
        key: &str,
        result: &mut ValidationResult,
    ) {
        if value.is_empty() {
            if field.is_required {
                result.add(key, "Required.");
            }
            // absent optional values get no checks at all
            return;
        }

        let text = value.text();

        match &field.field_type {
            FieldType::Email => {
                if !email_pattern().is_match(&text) {
                    result.add(key, "Invalid email.");
                }
            }
            FieldType::Number => {
                if parse_number(&text).is_none() {
                    result.add(key, "Invalid number.");
                }
            }
            FieldType::Select | FieldType::Radio => {
                if !Self::is_allowed_option(field, &text) {
                    result.add(key, "Invalid option.");
                }
            }
            FieldType::Checkbox => match value.as_list() {
                Some(items) => {
                    for item in items {
                        if !Self::is_allowed_option(field, &item.text()) {
                            result.add(key, "Invalid option.");
                            break;
                        }
                    }
                }
                None => result.add(key, "Invalid option."),
            },
            // unknown types fall through to rule checks only
            _ => {}
        }

        let Some(rules) = &field.validation_rules else {
            return;
        };

        let count = text.chars().count() as f64;
        if let Some(min) = rules.min_length() {
            if count < min {
                result.add(key, "Too short.");
            }
        }
        if let Some(max) = rules.max_length() {
            if count > max {
                result.add(key, "Too long.");
            }
        }

        if field.field_type == FieldType::Number {
            if let Some(n) = parse_number(&text) {
                if let Some(min) = rules.min() {
                    if n < min {
                        result.add(key, "Too small.");
                    }
                }
                if let Some(max) = rules.max() {
                    if n > max {
                        result.add(key, "Too large.");
                    }
                }
            }
        }

        if let Some(pattern) = rules.pattern() {
            // a pattern that fails to compile is ignored, not reported
            if let Some(re) = compile_rule_pattern(pattern) {
                if !re.is_match(&text) {
                    result.add(key, "Invalid format.");
                }
            }
        }
    }

    fn is_allowed_option(field: &FieldDefinition, value: &str) -> bool {
        field
            .options
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|opt| opt.value == value)
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Strict numeric parse: finite floats only.
fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Compiles a caller-supplied rule pattern under the size limit.
fn compile_rule_pattern(pattern: &str) -> Option<Regex> {
    RegexBuilder::new(pattern)
        .size_limit(RULE_PATTERN_SIZE_LIMIT)
        .build()
        .ok()
}
