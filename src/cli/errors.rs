//! CLI-specific error types
//!
//! All CLI errors are fatal: main prints them and exits non-zero.

use std::io;
use std::path::Path;

use thiserror::Error;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    pub fn read_file(path: &Path, source: io::Error) -> Self {
        Self::ReadFile {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn invalid_json(path: &Path, source: serde_json::Error) -> Self {
        Self::InvalidJson {
            path: path.display().to_string(),
            source,
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_file() {
        let err = CliError::read_file(
            Path::new("fields.json"),
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        let text = format!("{}", err);
        assert!(text.contains("fields.json"));
    }
}
