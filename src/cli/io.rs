//! JSON file I/O for the CLI
//!
//! Inputs are JSON files exported by the storage layer; output is a
//! single pretty-printed JSON document on stdout.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::{CliError, CliResult};

/// Reads and decodes one JSON input file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let content = fs::read_to_string(path).map_err(|e| CliError::read_file(path, e))?;
    serde_json::from_str(&content).map_err(|e| CliError::invalid_json(path, e))
}

/// Writes one JSON document to stdout.
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout();
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    writeln!(stdout, "{}", rendered)?;
    stdout.flush()?;
    Ok(())
}
