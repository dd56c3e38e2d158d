//! dynaform - A strict, deterministic form schema and validation engine
//!
//! Builds form schemas from flat stored field rows, validates submitted
//! answer payloads against them, and flattens stored submissions for export.

pub mod cli;
pub mod export;
pub mod observability;
pub mod schema;
pub mod validation;
