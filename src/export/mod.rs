//! Export flattening subsystem for dynaform
//!
//! Turns a stored submission's answer rows into a flat label→value map
//! for CSV/JSON export writers and report views. Values stay verbatim;
//! null is preserved distinctly from the empty string.

mod flattener;

pub use flattener::{AnswerRow, ExportFlattener, StoredSubmission};
