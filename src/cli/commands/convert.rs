//! Convert command implementation

use crate::cli::error::CliError;
use crate::cli::output::{format_conversion_json, format_conversion_summary};
use crate::config::ConversionConfig;
use crate::convert::convert_file;
use std::path::PathBuf;

/// Arguments for the `convert` command
pub struct ConvertArgs {
    /// SQL Server DDL file
    pub input: PathBuf,
    /// Output file (derived from the input when not provided)
    pub output: Option<PathBuf>,
    /// Emit bare table names even when a schema was parsed
    pub no_schema: bool,
    /// Catalog placed before the schema
    pub catalog: Option<String>,
    /// TOML configuration file
    pub config: Option<PathBuf>,
    /// Summary format (text, json)
    pub format: String,
}

/// Resolve the configuration: file (or defaults), then flag overrides
pub fn resolve_config(args: &ConvertArgs) -> Result<ConversionConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => ConversionConfig::from_file(path)?,
        None => ConversionConfig::default(),
    };

    if args.no_schema {
        config.qualify_with_schema = false;
    }
    if let Some(catalog) = &args.catalog {
        config.catalog = Some(catalog.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Handle the `convert` command
pub fn handle_convert(args: &ConvertArgs) -> Result<(), CliError> {
    let config = resolve_config(args)?;
    let report = convert_file(&args.input, args.output.as_deref(), &config)?;

    let summary = match args.format.as_str() {
        "json" => format_conversion_json(&report)?,
        "text" => format_conversion_summary(&report),
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}",
                other
            )));
        }
    };

    print!("{}", summary);
    Ok(())
}
