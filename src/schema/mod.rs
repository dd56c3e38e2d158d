//! Schema builder subsystem for dynaform
//!
//! Converts flat stored field rows into a forest of field definitions
//! (top-level fields plus repeater children, depth 2 at most).
//!
//! # Design Principles
//!
//! - Definitions are built fresh per call and never mutated afterwards
//! - Malformed stored data degrades the field, it never aborts the build
//! - Child and forest ordering is deterministic: (order_index asc, id asc)
//! - Dynamic option sources are injected by the caller, never fetched here

mod builder;
mod errors;
mod options;
mod types;

pub use builder::{BuildContext, SchemaBuild, SchemaBuilder};
pub use errors::SchemaWarning;
pub use options::OptionsNormalizer;
pub use types::{ChoiceOption, FieldDefinition, FieldType, RawFieldRow, SourceType};
