//! CLI argument definitions using clap
//!
//! Commands:
//! - dynaform schema --fields <rows.json> [--departments <opts.json>]
//! - dynaform validate --fields <rows.json> --answers <answers.json>
//!   [--files <files.json>] [--departments <opts.json>]
//! - dynaform export --fields <rows.json> --submission <submission.json>
//!   [--departments <opts.json>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dynaform - A strict, deterministic form schema and validation engine
#[derive(Parser, Debug)]
#[command(name = "dynaform")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the field forest from stored rows and print it as JSON
    Schema {
        /// Path to the stored field rows (JSON array)
        #[arg(long)]
        fields: PathBuf,

        /// Path to injected department options (JSON array)
        #[arg(long)]
        departments: Option<PathBuf>,
    },

    /// Validate a submitted answer payload against the field forest
    Validate {
        /// Path to the stored field rows (JSON array)
        #[arg(long)]
        fields: PathBuf,

        /// Path to the submitted answers (JSON object)
        #[arg(long)]
        answers: PathBuf,

        /// Path to the upload metadata bag (JSON object)
        #[arg(long)]
        files: Option<PathBuf>,

        /// Path to injected department options (JSON array)
        #[arg(long)]
        departments: Option<PathBuf>,
    },

    /// Flatten a stored submission into a label→value export map
    Export {
        /// Path to the stored field rows (JSON array)
        #[arg(long)]
        fields: PathBuf,

        /// Path to the stored submission (JSON object with answer rows)
        #[arg(long)]
        submission: PathBuf,

        /// Path to injected department options (JSON array)
        #[arg(long)]
        departments: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
