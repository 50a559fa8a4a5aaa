//! Human-readable summary renderers for schema diffs and change summaries.

use crate::diff::model::{ColumnStatus, DiffClassification, SchemaDiff};
use crate::grid::{rows_to_grid, GridOptions};
use crate::summary::ChangeSummary;

/// Render a Markdown summary of a [`SchemaDiff`].
///
/// Rows are listed in grid order (`current_index ?? base_index`). The output
/// is informational only and does not affect the structured diff.
pub fn render_schema_summary(diff: &SchemaDiff, options: &GridOptions) -> String {
    let mut out = String::new();

    out.push_str("## Schema Diff\n\n");

    let class_label = match diff.classification {
        DiffClassification::Identical => "Identical",
        DiffClassification::Changed => "Changed",
    };
    out.push_str(&format!("**Classification**: {class_label}\n\n"));

    out.push_str(&format!(
        "| | Digest | Columns |\n\
         |---|---|---|\n\
         | Base | `{}` | {} |\n\
         | Current | `{}` | {} |\n\n",
        short(&diff.identity.base_digest),
        diff.rows.iter().filter(|r| r.base_index.is_some()).count(),
        short(&diff.identity.current_digest),
        diff.rows.iter().filter(|r| r.current_index.is_some()).count(),
    ));

    if diff.classification == DiffClassification::Identical {
        out.push_str("_No schema changes detected._\n");
        return out;
    }

    let c = &diff.counts;
    out.push_str(&format!(
        "- **Added**: {}\n- **Removed**: {}\n- **Modified**: {}\n- **Reordered**: {}\n- **Unchanged**: {}\n\n",
        c.added, c.removed, c.modified, c.reordered, c.unchanged
    ));

    let grid = rows_to_grid(diff.rows.clone(), options);
    if grid.is_empty() {
        return out;
    }

    out.push_str("| # | Column | Base | Current | Status |\n");
    out.push_str("|---|---|---|---|---|\n");
    for grid_row in &grid.rows {
        let row = &grid_row.row;
        let type_cell = |t: &Option<String>, present: bool| match (t, present) {
            (_, false) => "-".to_string(),
            (Some(t), true) => code_span(t),
            (None, true) => "?".to_string(),
        };
        let status = if row.reordered && row.status != ColumnStatus::Reordered {
            format!("{} (reordered)", row.status)
        } else {
            row.status.to_string()
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            row.effective_index(),
            code_span(&row.name),
            type_cell(&row.base_type, row.base_index.is_some()),
            type_cell(&row.current_type, row.current_index.is_some()),
            status,
        ));
    }
    out
}

/// Render a Markdown table of a [`ChangeSummary`].
pub fn render_change_summary(summary: &ChangeSummary) -> String {
    let mut out = String::new();
    out.push_str("## Change Summary\n\n");

    if summary.is_empty() {
        out.push_str("_No changes in modified set._\n");
        return out;
    }

    out.push_str("| | Added | Removed | Modified |\n");
    out.push_str("|---|---|---|---|\n");
    out.push_str(&format!(
        "| Nodes | {} | {} | {} |\n",
        summary.node_added, summary.node_removed, summary.node_modified
    ));
    out.push_str(&format!(
        "| Columns | {} | {} | {} |\n",
        summary.col_added, summary.col_removed, summary.col_modified
    ));
    out
}

/// Format `text` as an inline code span that is safe inside a table cell.
///
/// Pipes are escaped, line breaks become spaces, and the backtick fence is one
/// longer than the longest backtick run in `text`.
pub fn code_span(text: &str) -> String {
    let mut longest_run = 0;
    let mut run = 0;
    for ch in text.chars() {
        if ch == '`' {
            run += 1;
            longest_run = longest_run.max(run);
        } else {
            run = 0;
        }
    }

    let body: String = text
        .chars()
        .flat_map(|ch| match ch {
            '|' => vec!['\\', '|'],
            '\n' | '\r' => vec![' '],
            other => vec![other],
        })
        .collect();
    let fence = "`".repeat(longest_run + 1);
    let pad = if body.starts_with('`') || body.ends_with('`') {
        " "
    } else {
        ""
    };
    format!("{fence}{pad}{body}{pad}{fence}")
}

/// Return the first 12 characters of a digest for display purposes.
fn short(digest: &str) -> &str {
    let end = digest.len().min(12);
    &digest[..end]
}
