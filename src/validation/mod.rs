//! Submission validation subsystem for dynaform
//!
//! Walks a schema forest against a submitted answer payload (plus the
//! file-upload metadata bag) and produces a per-key error map.
//!
//! # Design Principles
//!
//! - Malformed submitted data becomes validation errors, never panics
//! - All rule violations on one field accumulate; nothing stops early
//! - Error keys are deterministic: `fieldKey` or `fieldKey.index.childKey`
//! - The validator mutates nothing and reads no ambient state

mod rules;
mod validator;
mod value;

pub use rules::ValidationRules;
pub use validator::{ValidationResult, Validator};
pub use value::{AnswerMap, AnswerValue, FileMap, FileMetadata, UPLOAD_OK};
