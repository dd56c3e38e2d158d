//! Options Normalization Tests
//!
//! Tests the canonical option list for every stored payload shape:
//! scalars, value→label maps, scalar lists, and value/label map lists.

use dynaform::schema::{ChoiceOption, OptionsNormalizer};
use serde_json::json;

fn normalize(value: serde_json::Value) -> Vec<ChoiceOption> {
    OptionsNormalizer::normalize(&value)
}

/// A bare scalar becomes one mirrored option.
#[test]
fn test_scalar_payload() {
    assert_eq!(
        normalize(json!("Cairo")),
        vec![ChoiceOption::new("Cairo", "Cairo")]
    );
}

/// A value→label map keeps keys as values and values as labels.
#[test]
fn test_map_payload() {
    assert_eq!(
        normalize(json!({"cairo": "القاهرة"})),
        vec![ChoiceOption::new("cairo", "القاهرة")]
    );
}

/// A scalar list mirrors every element.
#[test]
fn test_scalar_list_payload() {
    assert_eq!(
        normalize(json!(["a", "b"])),
        vec![ChoiceOption::new("a", "a"), ChoiceOption::new("b", "b")]
    );
}

/// Empty keys are dropped from map payloads.
#[test]
fn test_empty_key_dropped() {
    assert!(normalize(json!({"": "x"})).is_empty());
}

/// Null and the empty string normalize to no options.
#[test]
fn test_null_and_empty_payloads() {
    assert!(normalize(json!(null)).is_empty());
    assert!(normalize(json!("")).is_empty());
}

/// Map entries keep their stored order.
#[test]
fn test_map_order_preserved() {
    let opts = normalize(json!({"third": "3", "first": "1", "second": "2"}));
    let values: Vec<&str> = opts.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["third", "first", "second"]);
}

/// One-sided value/label entries mirror the non-empty side.
#[test]
fn test_one_sided_entries_mirror() {
    let opts = normalize(json!([
        {"value": "v1", "label": ""},
        {"value": "", "label": "L2"}
    ]));
    assert_eq!(
        opts,
        vec![
            ChoiceOption::new("v1", "v1"),
            ChoiceOption::new("L2", "L2"),
        ]
    );
}

/// Duplicates survive; the normalizer never de-duplicates.
#[test]
fn test_no_deduplication() {
    let opts = normalize(json!(["x", "x"]));
    assert_eq!(opts.len(), 2);
}

/// Unsupported shapes normalize to nothing instead of failing.
#[test]
fn test_unsupported_shapes() {
    assert!(normalize(json!([[1, 2], null])).is_empty());
}

/// Mixed numeric scalars are stringified.
#[test]
fn test_numeric_elements() {
    assert_eq!(
        normalize(json!([1, 2.5])),
        vec![ChoiceOption::new("1", "1"), ChoiceOption::new("2.5", "2.5")]
    );
}
