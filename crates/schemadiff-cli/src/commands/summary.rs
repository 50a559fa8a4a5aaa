//! Summary command
//!
//! Usage: schemadiff summary <LINEAGE_FILE> [--format <FORMAT>] [--output <FILE>]

use super::{emit, read_input, require_file, to_json};
use crate::config::{OutputFormat, SchemadiffConfig};
use clap::Args;
use schemadiff_core::diff::render_change_summary;
use schemadiff_core::model::parse_lineage_bytes;
use schemadiff_core::{summarize_graph, ExError};
use schemadiff_core_types::RequestContext;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Lineage graph (JSON) with `nodes` and `modified_set`
    pub lineage_file: PathBuf,

    /// Output format (default from config, else markdown)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute summary command
pub fn execute(
    args: SummaryArgs,
    config: &SchemadiffConfig,
    ctx: &RequestContext,
) -> Result<(), ExError> {
    require_file(&args.lineage_file, "cli_summary")?;
    let bytes = read_input(Some(args.lineage_file.as_path()))?;
    let graph = parse_lineage_bytes(&bytes).map_err(|e| {
        e.with_entity_id(args.lineage_file.display().to_string())
    })?;

    tracing::debug!(
        op = "cli_summary",
        request_id = ctx.request_id.as_str(),
        node_count = graph.nodes.len(),
        "lineage loaded"
    );
    let summary = summarize_graph(&graph);

    let content = match config.resolve_format(args.format) {
        OutputFormat::Markdown => render_change_summary(&summary),
        OutputFormat::Json => to_json(&summary)?,
    };
    emit(args.output.as_deref(), &content)
}
