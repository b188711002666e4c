//! Configuration for DDL conversion

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors raised while loading or validating a [`ConversionConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Io { path: String, message: String },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration for rendering Delta DDL
///
/// Can be loaded from TOML:
///
/// ```toml
/// qualifyWithSchema = false
/// catalog = "main"
/// engine = "DELTA"
/// fallbackType = "STRING"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ConversionConfig {
    /// Prefix table names with their SQL Server schema when one was parsed
    pub qualify_with_schema: bool,

    /// Unity Catalog name placed before the schema when qualifying
    pub catalog: Option<String>,

    /// Storage engine for the `USING` clause
    pub engine: String,

    /// Target type for SQL Server types missing from the mapping table
    pub fallback_type: String,

    /// Suffix appended to the input file stem to derive the output file name
    pub output_suffix: String,

    /// Emit a `-- Table: <name>` line above each statement
    pub emit_table_comments: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            qualify_with_schema: true,
            catalog: None,
            engine: "DELTA".to_string(),
            fallback_type: crate::convert::DEFAULT_FALLBACK_TYPE.to_string(),
            output_suffix: "_databricks".to_string(),
            emit_table_comments: true,
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.trim().is_empty() {
            return Err(ConfigError::Invalid("engine must not be empty".to_string()));
        }
        if self.fallback_type.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "fallbackType must not be empty".to_string(),
            ));
        }
        if self.catalog.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "catalog must not be empty when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for ConversionConfig
#[derive(Debug, Default)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn qualify_with_schema(mut self, qualify: bool) -> Self {
        self.config.qualify_with_schema = qualify;
        self
    }

    pub fn catalog(mut self, catalog: impl Into<String>) -> Self {
        self.config.catalog = Some(catalog.into());
        self
    }

    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.config.engine = engine.into();
        self
    }

    pub fn fallback_type(mut self, fallback: impl Into<String>) -> Self {
        self.config.fallback_type = fallback.into();
        self
    }

    pub fn output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.output_suffix = suffix.into();
        self
    }

    pub fn emit_table_comments(mut self, emit: bool) -> Self {
        self.config.emit_table_comments = emit;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ConversionConfig {
        self.config
    }
}
