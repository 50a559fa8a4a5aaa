//! Schema command
//!
//! Usage: schemadiff schema --base <FILE> --current <FILE> [--format <FORMAT>]
//!        [--changed-only] [--output <FILE>]

use super::{emit, read_input, require_file, to_json};
use crate::config::{OutputFormat, SchemadiffConfig};
use clap::Args;
use schemadiff_core::diff::{compute_schema_diff_bytes, render_schema_summary};
use schemadiff_core::grid::{rows_to_grid, SchemaDataGrid};
use schemadiff_core::{log_op_end, log_op_error, log_op_start, ExError, GridOptions, SchemaDiff};
use schemadiff_core_types::RequestContext;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Base column map (JSON); omitted means no columns
    #[arg(long)]
    pub base: Option<PathBuf>,

    /// Current column map (JSON); omitted means no columns
    #[arg(long)]
    pub current: Option<PathBuf>,

    /// Output format (default from config, else markdown)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Hide unchanged columns
    #[arg(long)]
    pub changed_only: bool,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// JSON output: the structured diff plus its display rows
#[derive(Serialize)]
struct SchemaReport<'a> {
    diff: &'a SchemaDiff,
    grid: &'a SchemaDataGrid,
}

/// Execute schema command
pub fn execute(
    args: SchemaArgs,
    config: &SchemadiffConfig,
    ctx: &RequestContext,
) -> Result<(), ExError> {
    let start = Instant::now();
    log_op_start!("cli_schema", request_id = ctx.request_id.as_str());

    match run(&args, config) {
        Ok(()) => {
            log_op_end!(
                "cli_schema",
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = ctx.request_id.as_str()
            );
            Ok(())
        }
        Err(err) => {
            log_op_error!(
                "cli_schema",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = ctx.request_id.as_str()
            );
            Err(err)
        }
    }
}

fn run(args: &SchemaArgs, config: &SchemadiffConfig) -> Result<(), ExError> {
    for path in [&args.base, &args.current].into_iter().flatten() {
        require_file(path, "cli_schema")?;
    }

    let base = read_input(args.base.as_deref())?;
    let current = read_input(args.current.as_deref())?;
    let diff = compute_schema_diff_bytes(&base, &current)?;

    let options = GridOptions {
        changed_only: args.changed_only || config.output.changed_only,
    };

    let content = match config.resolve_format(args.format) {
        OutputFormat::Markdown => render_schema_summary(&diff, &options),
        OutputFormat::Json => {
            let grid = rows_to_grid(diff.rows.clone(), &options);
            to_json(&SchemaReport {
                diff: &diff,
                grid: &grid,
            })?
        }
    };

    emit(args.output.as_deref(), &content)
}
