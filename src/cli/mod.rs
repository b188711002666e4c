//! CLI module for the mssql-delta-ddl binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
