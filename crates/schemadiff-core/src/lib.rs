//! schemadiff core - schema merge and change aggregation
//!
//! This crate provides the data transformations behind a base/current
//! review view:
//! - Ordered column maps and lineage graph models
//! - Schema column merge with added/removed/modified/reordered classification
//! - Grid shaping (effective-index ordering, single-environment listings)
//! - Change summary aggregation over a lineage graph's modified set
//! - Structured, digest-identified schema diffs and Markdown summaries
//!
//! Everything here is synchronous and pure over immutable inputs.

pub mod diff;
pub mod errors;
pub mod grid;
pub mod logging_facility;
pub mod model;
pub mod summary;

// Used by the exported logging macros
pub use schemadiff_core_types;

// Re-export commonly used types
pub use diff::{compute_schema_diff, merge_schema_columns, ColumnStatus, MergedColumnRow, SchemaDiff};
pub use errors::{ExError, ExErrorKind, Result, SchemaDiffError};
pub use grid::{to_schema_data_grid, to_single_env_data_grid, GridOptions};
pub use model::{ColumnMap, ColumnSchema, LineageGraph, LineageNode, NodeChangeTag};
pub use summary::{calculate_change_summary, summarize_graph, ChangeSummary};
