//! Row shaping for schema grids.
//!
//! The presentation layer renders these rows as-is: ordering, filtering and
//! the per-row class are decided here from the merge status.

use crate::diff::merge::merge_schema_columns;
use crate::diff::model::{ColumnStatus, MergedColumnRow};
use crate::model::column::ColumnMap;
use serde::{Deserialize, Serialize};

/// Options for [`to_schema_data_grid`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridOptions {
    /// Drop rows whose status is `Unchanged`
    #[serde(default)]
    pub changed_only: bool,
}

/// A merged row plus its display class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaGridRow {
    #[serde(flatten)]
    pub row: MergedColumnRow,
    /// `schema-row-<status>`, absent for unchanged rows
    pub row_class: Option<String>,
}

impl From<MergedColumnRow> for SchemaGridRow {
    fn from(row: MergedColumnRow) -> Self {
        let row_class = match row.status {
            ColumnStatus::Unchanged => None,
            status => Some(format!("schema-row-{}", status.as_str())),
        };
        Self { row, row_class }
    }
}

/// Two-environment schema grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDataGrid {
    pub rows: Vec<SchemaGridRow>,
}

impl SchemaDataGrid {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One row of a single-environment column listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleEnvRow {
    /// 1-based position among present columns
    pub index: usize,
    pub name: String,
    pub column_type: Option<String>,
}

/// Stable sort by `current_index ?? base_index ?? +inf`.
pub fn sort_by_effective_index(rows: &mut [MergedColumnRow]) {
    rows.sort_by_key(MergedColumnRow::effective_index);
}

/// Merge both sides and shape the result for a two-environment grid.
pub fn to_schema_data_grid(
    base: Option<&ColumnMap>,
    current: Option<&ColumnMap>,
    options: &GridOptions,
) -> SchemaDataGrid {
    rows_to_grid(merge_schema_columns(base, current), options)
}

/// Shape already-merged rows (e.g. from a `SchemaDiff`) for display.
pub fn rows_to_grid(mut rows: Vec<MergedColumnRow>, options: &GridOptions) -> SchemaDataGrid {
    sort_by_effective_index(&mut rows);
    SchemaDataGrid {
        rows: rows
            .into_iter()
            .filter(|row| !options.changed_only || row.is_changed())
            .map(SchemaGridRow::from)
            .collect(),
    }
}

/// List the present columns of one environment in schema order.
pub fn to_single_env_data_grid(columns: Option<&ColumnMap>) -> Vec<SingleEnvRow> {
    columns
        .map(|columns| {
            columns
                .present()
                .enumerate()
                .map(|(i, (name, column))| SingleEnvRow {
                    index: i + 1,
                    name: name.to_string(),
                    column_type: column.column_type.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}
