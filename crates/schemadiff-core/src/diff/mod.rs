//! Schema diff.
//!
//! Merges two ordered column maps and produces a structured, deterministic
//! diff suitable for grids and human review.
//!
//! ## Entry point
//!
//! ```
//! use schemadiff_core::diff::engine::compute_schema_diff;
//! use schemadiff_core::model::ColumnMap;
//!
//! let base = ColumnMap::new().with_column("id", "INT");
//! let current = ColumnMap::new().with_column("id", "INT").with_column("email", "VARCHAR");
//! let diff = compute_schema_diff(Some(&base), Some(&current));
//! assert_eq!(diff.counts.added, 1);
//! ```
//!
//! ## Guarantees
//!
//! - **Totality**: merging never fails; absent inputs are empty maps.
//! - **Determinism**: identical inputs produce byte-identical serialized output.
//! - **Exact matching**: column names are compared case-sensitively, unmodified.

pub mod engine;
pub mod human_summary;
pub mod merge;
pub mod model;

pub use engine::{compute_schema_diff, compute_schema_diff_bytes};
pub use human_summary::{code_span, render_change_summary, render_schema_summary};
pub use merge::merge_schema_columns;
pub use model::{ColumnStatus, MergedColumnRow, SchemaDiff};
