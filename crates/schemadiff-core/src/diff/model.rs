//! Schema diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Row lists are ordered deterministically (union order or grid order) so the
//! serialized form is stable across runs.

use serde::{Deserialize, Serialize};

/// Per-column classification emitted by the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnStatus {
    /// Present in current only
    Added,
    /// Present in base only
    Removed,
    /// Present on both sides with different declared types
    Modified,
    /// Present on both sides with the same type at different positions
    Reordered,
    /// Present on both sides with the same type at the same position
    Unchanged,
}

impl ColumnStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnStatus::Added => "added",
            ColumnStatus::Removed => "removed",
            ColumnStatus::Modified => "modified",
            ColumnStatus::Reordered => "reordered",
            ColumnStatus::Unchanged => "unchanged",
        }
    }

    /// Derive the status from side presence, type equality and position.
    ///
    /// Returns `None` when the column is present on neither side.
    pub fn derive(
        base_index: Option<usize>,
        current_index: Option<usize>,
        same_type: bool,
    ) -> Option<ColumnStatus> {
        match (base_index, current_index) {
            (None, None) => None,
            (None, Some(_)) => Some(ColumnStatus::Added),
            (Some(_), None) => Some(ColumnStatus::Removed),
            (Some(_), Some(_)) if !same_type => Some(ColumnStatus::Modified),
            (Some(b), Some(c)) if b != c => Some(ColumnStatus::Reordered),
            (Some(_), Some(_)) => Some(ColumnStatus::Unchanged),
        }
    }
}

impl std::fmt::Display for ColumnStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the merged schema: a single column name across both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedColumnRow {
    /// Column identifier (exact, case-sensitive)
    pub name: String,
    /// 1-based position among present base columns
    pub base_index: Option<usize>,
    /// 1-based position among present current columns
    pub current_index: Option<usize>,
    /// Declared type in base
    pub base_type: Option<String>,
    /// Declared type in current
    pub current_type: Option<String>,
    pub status: ColumnStatus,
    /// True iff the column exists on both sides at different positions
    pub reordered: bool,
}

impl MergedColumnRow {
    /// Sort key used by the schema grid: `current_index ?? base_index ?? +inf`
    pub fn effective_index(&self) -> usize {
        self.current_index.or(self.base_index).unwrap_or(usize::MAX)
    }

    /// True for every status except `Unchanged`
    pub fn is_changed(&self) -> bool {
        self.status != ColumnStatus::Unchanged
    }
}

/// Number of rows in each status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub reordered: usize,
    pub unchanged: usize,
}

impl StatusCounts {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a MergedColumnRow>) -> Self {
        let mut counts = StatusCounts::default();
        for row in rows {
            match row.status {
                ColumnStatus::Added => counts.added += 1,
                ColumnStatus::Removed => counts.removed += 1,
                ColumnStatus::Modified => counts.modified += 1,
                ColumnStatus::Reordered => counts.reordered += 1,
                ColumnStatus::Unchanged => counts.unchanged += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.added + self.removed + self.modified + self.reordered + self.unchanged
    }
}

/// Digest identity for both sides of the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaIdentity {
    /// SHA-256 of the present base columns, in order
    pub base_digest: String,
    /// SHA-256 of the present current columns, in order
    pub current_digest: String,
}

/// High-level classification of a schema diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffClassification {
    /// Same present columns, same types, same order
    Identical,
    /// At least one row is not `Unchanged`
    Changed,
}

/// The top-level structured diff between two column maps.
///
/// `diff_schema_version` is always 1 for this implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDiff {
    pub diff_schema_version: u32,
    pub identity: SchemaIdentity,
    pub classification: DiffClassification,
    /// Merged rows in union order (base order, then current-only names)
    pub rows: Vec<MergedColumnRow>,
    pub counts: StatusCounts,
}

/// Column-level change used by the change summary (no positions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnChangeKind {
    Added,
    Removed,
    Modified,
}

/// A single changed column of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnChange {
    pub name: String,
    pub kind: ColumnChangeKind,
}
