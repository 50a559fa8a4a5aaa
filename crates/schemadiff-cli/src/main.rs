//! schemadiff CLI
//!
//! Command-line interface for schema merge and change summaries

use clap::{Parser, Subcommand};
use schemadiff_core::logging_facility;
use schemadiff_core::ExError;
use schemadiff_core_types::RequestContext;
use std::path::PathBuf;

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "schemadiff")]
#[command(about = "schemadiff - Compare base and current table schemas", long_about = None)]
struct Cli {
    /// Config file (default: .schemadiff/config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff two column maps
    Schema(commands::schema::SchemaArgs),
    /// List the columns of a single column map
    Columns(commands::columns::ColumnsArgs),
    /// Summarize the modified nodes of a lineage graph
    Summary(commands::summary::SummaryArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Schema(_) => "schema",
            Commands::Columns(_) => "columns",
            Commands::Summary(_) => "summary",
        }
    }
}

fn run(cli: Cli, ctx: &RequestContext) -> Result<(), ExError> {
    let config = match &cli.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_workspace_config(".")?,
    };
    logging_facility::init(config.logging.profile);

    match cli.command {
        Commands::Schema(args) => commands::schema::execute(args, &config, ctx),
        Commands::Columns(args) => commands::columns::execute(args, &config, ctx),
        Commands::Summary(args) => commands::summary::execute(args, &config, ctx),
    }
}

fn main() {
    let cli = Cli::parse();
    let ctx = RequestContext::new().with_origin(cli.command.name());

    if let Err(e) = run(cli, &ctx) {
        eprintln!("Error: {}", e.with_request_id(ctx.request_id.clone()));
        std::process::exit(1);
    }
}
