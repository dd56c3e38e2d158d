//! CLI command implementations
//!
//! Each command loads its JSON inputs, runs the engine, and prints one
//! JSON document on stdout. Schema warnings surface as WARN log lines;
//! they never fail a command.

use std::path::Path;

use crate::export::{ExportFlattener, StoredSubmission};
use crate::observability::Logger;
use crate::schema::{BuildContext, ChoiceOption, FieldDefinition, RawFieldRow, SchemaBuilder};
use crate::validation::{AnswerMap, FileMap, Validator};

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::{read_json_file, write_json};

/// Parses arguments and dispatches to the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match cli.command {
        Command::Schema {
            fields,
            departments,
        } => schema(&fields, departments.as_deref()),
        Command::Validate {
            fields,
            answers,
            files,
            departments,
        } => validate(&fields, &answers, files.as_deref(), departments.as_deref()),
        Command::Export {
            fields,
            submission,
            departments,
        } => export(&fields, &submission, departments.as_deref()),
    }
}

/// Builds the forest and prints it.
pub fn schema(fields: &Path, departments: Option<&Path>) -> CliResult<()> {
    let forest = load_forest(fields, departments)?;
    write_json(&forest)
}

/// Validates a submitted payload and prints the result.
pub fn validate(
    fields: &Path,
    answers: &Path,
    files: Option<&Path>,
    departments: Option<&Path>,
) -> CliResult<()> {
    let forest = load_forest(fields, departments)?;
    let answers: AnswerMap = read_json_file(answers)?;
    let files: FileMap = match files {
        Some(path) => read_json_file(path)?,
        None => FileMap::new(),
    };

    let result = Validator::validate(&answers, &forest, &files);
    let error_count = result.errors.len().to_string();
    Logger::info(
        "VALIDATION_COMPLETE",
        &[
            ("errors", &error_count),
            ("valid", if result.valid { "true" } else { "false" }),
        ],
    );

    write_json(&result)
}

/// Flattens a stored submission and prints the export map.
pub fn export(fields: &Path, submission: &Path, departments: Option<&Path>) -> CliResult<()> {
    let forest = load_forest(fields, departments)?;
    let submission: StoredSubmission = read_json_file(submission)?;

    let flat = ExportFlattener::flatten(&submission, &forest);
    let value_count = flat.len().to_string();
    Logger::info("EXPORT_COMPLETE", &[("values", &value_count)]);

    write_json(&flat)
}

/// Loads rows plus optional department options and builds the forest,
/// logging every recovered anomaly.
fn load_forest(fields: &Path, departments: Option<&Path>) -> CliResult<Vec<FieldDefinition>> {
    let rows: Vec<RawFieldRow> = read_json_file(fields)?;
    let ctx = load_context(departments)?;

    let build = SchemaBuilder::build_detailed(&rows, &ctx);
    for warning in &build.warnings {
        let field_id = warning.field_id().to_string();
        let detail = warning.to_string();
        Logger::warn(
            warning.event(),
            &[("detail", &detail), ("field_id", &field_id)],
        );
    }

    let field_count = build.fields.len().to_string();
    let warning_count = build.warnings.len().to_string();
    Logger::info(
        "SCHEMA_BUILD_COMPLETE",
        &[("fields", &field_count), ("warnings", &warning_count)],
    );

    Ok(build.fields)
}

fn load_context(departments: Option<&Path>) -> CliResult<BuildContext> {
    match departments {
        None => Ok(BuildContext::empty()),
        Some(path) => {
            let options: Vec<ChoiceOption> = read_json_file(path)?;
            Ok(BuildContext::with_departments(options))
        }
    }
}
