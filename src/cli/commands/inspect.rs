//! Inspect command implementation

use super::load_input;
use crate::cli::error::CliError;
use crate::cli::output::{collect_type_mappings, format_inspect_output};
use crate::import::SQLServerImporter;

/// Handle the `inspect` command: show the parsed structure without converting
pub fn handle_inspect(input: &str, json: bool) -> Result<(), CliError> {
    let content = load_input(input)?;
    let result = SQLServerImporter::new().parse(&content);

    if json {
        println!("{}", serde_json::to_string_pretty(&result.tables)?);
    } else {
        let mappings = collect_type_mappings(&result);
        print!("{}", format_inspect_output(&result, &mappings));
    }

    Ok(())
}
