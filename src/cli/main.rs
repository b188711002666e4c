//! mssql-delta-ddl command line

use anyhow::Context;
use clap::{Parser, Subcommand};
use mssql_delta_ddl::cli::commands::convert::{ConvertArgs, handle_convert};
use mssql_delta_ddl::cli::commands::inspect::handle_inspect;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mssql-delta-ddl",
    version,
    about = "Convert SQL Server CREATE TABLE DDL to Databricks Delta DDL"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a SQL Server DDL file into a Delta DDL file
    Convert {
        /// SQL Server DDL file
        input: PathBuf,
        /// Output file (defaults to <input>_databricks.sql)
        output: Option<PathBuf>,
        /// Do not prefix table names with their schema
        #[arg(long)]
        no_schema: bool,
        /// Catalog to place before the schema
        #[arg(long)]
        catalog: Option<String>,
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Summary format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Show the parsed tables and type mappings of a SQL Server DDL file
    Inspect {
        /// SQL Server DDL file, or `-` for stdin
        input: String,
        /// Print the parsed tables as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            no_schema,
            catalog,
            config,
            format,
        } => {
            let args = ConvertArgs {
                input,
                output,
                no_schema,
                catalog,
                config,
                format,
            };
            handle_convert(&args)
                .with_context(|| format!("converting {}", args.input.display()))?;
        }
        Commands::Inspect { input, json } => {
            handle_inspect(&input, json).with_context(|| format!("inspecting {}", input))?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
