//! Observability subsystem for dynaform
//!
//! Structured JSON logging for the CLI driver. The engine itself stays
//! pure and returns warnings as data; whoever drives it decides what to
//! log.
//!
//! # Principles
//!
//! 1. One log line = one event
//! 2. Deterministic output (fixed leading keys, remaining keys sorted)
//! 3. Synchronous, no buffering, no background threads
//! 4. Logging never affects engine execution

mod logger;

pub use logger::{Logger, Severity};
