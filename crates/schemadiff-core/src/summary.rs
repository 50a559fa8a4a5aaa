//! Change summary over the modified nodes of a lineage graph.
//!
//! Node counts are taken from the upstream `change_status` tag as-is. Column
//! counts come from [`diff_column_presence`], a position-free classification
//! run once per node. Summaries add, so callers may compute them over chunks
//! in any order and reduce with `Sum`.

use crate::diff::model::{ColumnChange, ColumnChangeKind};
use crate::model::column::ColumnMap;
use crate::model::lineage::{LineageGraph, LineageNode, NodeChangeTag};
use crate::{log_op_end, log_op_start};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use std::time::Instant;

/// Node- and column-level change counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub node_added: usize,
    pub node_removed: usize,
    pub node_modified: usize,
    pub col_added: usize,
    pub col_removed: usize,
    pub col_modified: usize,
}

impl ChangeSummary {
    pub fn is_empty(&self) -> bool {
        *self == ChangeSummary::default()
    }

    pub fn node_total(&self) -> usize {
        self.node_added + self.node_removed + self.node_modified
    }

    pub fn col_total(&self) -> usize {
        self.col_added + self.col_removed + self.col_modified
    }
}

impl Add for ChangeSummary {
    type Output = ChangeSummary;

    fn add(mut self, rhs: ChangeSummary) -> ChangeSummary {
        self += rhs;
        self
    }
}

impl AddAssign for ChangeSummary {
    fn add_assign(&mut self, rhs: ChangeSummary) {
        self.node_added += rhs.node_added;
        self.node_removed += rhs.node_removed;
        self.node_modified += rhs.node_modified;
        self.col_added += rhs.col_added;
        self.col_removed += rhs.col_removed;
        self.col_modified += rhs.col_modified;
    }
}

impl std::iter::Sum for ChangeSummary {
    fn sum<I: Iterator<Item = ChangeSummary>>(iter: I) -> Self {
        iter.fold(ChangeSummary::default(), Add::add)
    }
}

/// Classify columns by presence and declared type only.
///
/// A column is `Modified` only when present on both sides with different
/// types. Order of the result: base names first, then current-only names.
pub fn diff_column_presence(
    base: Option<&ColumnMap>,
    current: Option<&ColumnMap>,
) -> Vec<ColumnChange> {
    let empty = ColumnMap::new();
    let base = base.unwrap_or(&empty);
    let current = current.unwrap_or(&empty);

    let mut changes = Vec::new();
    for (name, base_column) in base.present() {
        match current.get(name) {
            None => changes.push(ColumnChange {
                name: name.to_string(),
                kind: ColumnChangeKind::Removed,
            }),
            Some(current_column) if current_column.column_type != base_column.column_type => {
                changes.push(ColumnChange {
                    name: name.to_string(),
                    kind: ColumnChangeKind::Modified,
                })
            }
            Some(_) => {}
        }
    }
    for (name, _) in current.present() {
        if base.get(name).is_none() {
            changes.push(ColumnChange {
                name: name.to_string(),
                kind: ColumnChangeKind::Added,
            });
        }
    }
    changes
}

/// Summary contribution of a single node.
pub fn summarize_node(node: &LineageNode) -> ChangeSummary {
    let mut summary = ChangeSummary::default();
    match node.change_status {
        Some(NodeChangeTag::Added) => summary.node_added = 1,
        Some(NodeChangeTag::Removed) => summary.node_removed = 1,
        Some(NodeChangeTag::Modified) => summary.node_modified = 1,
        None => {}
    }

    for change in diff_column_presence(node.base_columns.as_ref(), node.current_columns.as_ref())
    {
        match change.kind {
            ColumnChangeKind::Added => summary.col_added += 1,
            ColumnChangeKind::Removed => summary.col_removed += 1,
            ColumnChangeKind::Modified => summary.col_modified += 1,
        }
    }
    summary
}

/// Sum the change summary over a collection of modified nodes.
pub fn calculate_change_summary<'a>(
    nodes: impl IntoIterator<Item = &'a LineageNode>,
) -> ChangeSummary {
    nodes.into_iter().map(summarize_node).sum()
}

/// Change summary of the graph's modified set.
///
/// Ids in `modified_set` that do not resolve to a node are skipped.
pub fn summarize_graph(graph: &LineageGraph) -> ChangeSummary {
    let start = Instant::now();
    log_op_start!("summarize_graph", node_count = graph.modified_set.len());

    for missing in graph
        .modified_set
        .iter()
        .filter(|id| !graph.nodes.contains_key(id.as_str()))
    {
        tracing::warn!(
            op = "summarize_graph",
            node_id = missing.as_str(),
            "modified node not present in lineage graph"
        );
    }

    let summary = calculate_change_summary(graph.modified_nodes());

    log_op_end!(
        "summarize_graph",
        duration_ms = start.elapsed().as_millis() as u64,
        node_count = summary.node_total()
    );
    summary
}
