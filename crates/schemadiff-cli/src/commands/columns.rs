//! Columns command
//!
//! Usage: schemadiff columns <FILE> [--format <FORMAT>]

use super::{emit, read_input, require_file, to_json};
use crate::config::{OutputFormat, SchemadiffConfig};
use clap::Args;
use schemadiff_core::diff::code_span;
use schemadiff_core::diff::engine::parse_column_map_bytes;
use schemadiff_core::grid::SingleEnvRow;
use schemadiff_core::{to_single_env_data_grid, ExError};
use schemadiff_core_types::RequestContext;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    /// Column map (JSON) of a single environment
    pub file: PathBuf,

    /// Output format (default from config, else markdown)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Execute columns command
pub fn execute(
    args: ColumnsArgs,
    config: &SchemadiffConfig,
    ctx: &RequestContext,
) -> Result<(), ExError> {
    require_file(&args.file, "cli_columns")?;
    let bytes = read_input(Some(args.file.as_path()))?;
    let columns = parse_column_map_bytes(&bytes)
        .map_err(|e| e.with_entity_id(args.file.display().to_string()))?;

    let rows = to_single_env_data_grid(Some(&columns));
    tracing::debug!(
        op = "cli_columns",
        request_id = ctx.request_id.as_str(),
        row_count = rows.len(),
        "listed columns"
    );

    let content = match config.resolve_format(args.format) {
        OutputFormat::Markdown => render_columns(&rows),
        OutputFormat::Json => to_json(&rows)?,
    };
    emit(None, &content)
}

fn render_columns(rows: &[SingleEnvRow]) -> String {
    let mut out = String::new();
    out.push_str("## Columns\n\n");

    if rows.is_empty() {
        out.push_str("_No columns._\n");
        return out;
    }

    out.push_str("| # | Column | Type |\n");
    out.push_str("|---|---|---|\n");
    for row in rows {
        let ty = row
            .column_type
            .as_deref()
            .map(code_span)
            .unwrap_or_else(|| "?".to_string());
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            row.index,
            code_span(&row.name),
            ty
        ));
    }
    out
}
