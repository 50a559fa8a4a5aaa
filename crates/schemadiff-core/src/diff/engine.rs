//! Schema diff computation engine.
//!
//! The entry points are [`compute_schema_diff`] for typed column maps and
//! [`compute_schema_diff_bytes`] for raw JSON input.

#![allow(clippy::result_large_err)]

use crate::diff::merge::merge_schema_columns;
use crate::diff::model::{DiffClassification, SchemaDiff, SchemaIdentity, StatusCounts};
use crate::errors::{ExError, ExErrorKind, Result, SchemaDiffError};
use crate::model::column::ColumnMap;
use crate::{log_op_end, log_op_start};
use serde_json::Value;
use sha2::{Digest as _, Sha256};
use std::time::Instant;

/// Parse JSON text into a [`ColumnMap`].
///
/// Empty input (after trimming whitespace) and a JSON `null` both yield an
/// empty map.
///
/// # Errors
///
/// Returns `SchemaDiffError::InvalidColumnMap` if the text is not JSON, the
/// root is not an object, or a member is neither an object nor `null`.
pub fn column_map_from_str(text: &str) -> Result<ColumnMap> {
    if text.trim().is_empty() {
        return Ok(ColumnMap::new());
    }

    let raw: Value = serde_json::from_str(text).map_err(|e| SchemaDiffError::InvalidColumnMap {
        reason: format!("column map is not valid JSON: {}", e),
    })?;

    if !(raw.is_object() || raw.is_null()) {
        return Err(SchemaDiffError::InvalidColumnMap {
            reason: "column map JSON root must be an object".to_string(),
        });
    }

    // Re-parse from text rather than from `raw`: `Value` objects do not keep
    // member order unless serde_json is built with `preserve_order`.
    serde_json::from_str::<ColumnMap>(text).map_err(|e| SchemaDiffError::InvalidColumnMap {
        reason: format!("failed to deserialize column map: {}", e),
    })
}

/// Parse raw JSON bytes into a [`ColumnMap`].
///
/// # Errors
///
/// - `InvalidColumnMap`: bytes are not UTF-8, or [`column_map_from_str`]
///   rejects the text
pub fn parse_column_map_bytes(bytes: &[u8]) -> std::result::Result<ColumnMap, ExError> {
    std::str::from_utf8(bytes)
        .map_err(|e| SchemaDiffError::InvalidColumnMap {
            reason: format!("column map is not valid UTF-8: {}", e),
        })
        .and_then(column_map_from_str)
        .map_err(|e| ExError::from(e).with_op("parse_column_map_bytes"))
}

/// SHA-256 over the present `(name, type)` pairs of a side, in order.
pub fn schema_digest(columns: &ColumnMap) -> String {
    let pairs: Vec<(&str, Option<&str>)> = columns
        .present()
        .map(|(name, column)| (name, column.column_type.as_deref()))
        .collect();
    let canonical = serde_json::to_string(&pairs).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compute a structured, deterministic diff between two column maps.
///
/// `None` for either side is treated as an empty map.
pub fn compute_schema_diff(base: Option<&ColumnMap>, current: Option<&ColumnMap>) -> SchemaDiff {
    let start = Instant::now();
    let empty = ColumnMap::new();
    let base = base.unwrap_or(&empty);
    let current = current.unwrap_or(&empty);

    log_op_start!(
        "compute_schema_diff",
        base_len = base.present_len(),
        current_len = current.present_len()
    );

    let identity = SchemaIdentity {
        base_digest: schema_digest(base),
        current_digest: schema_digest(current),
    };

    let rows = merge_schema_columns(Some(base), Some(current));
    let counts = StatusCounts::from_rows(&rows);

    let classification = if identity.base_digest == identity.current_digest {
        DiffClassification::Identical
    } else {
        DiffClassification::Changed
    };

    let diff = SchemaDiff {
        diff_schema_version: 1,
        identity,
        classification,
        rows,
        counts,
    };

    log_op_end!(
        "compute_schema_diff",
        duration_ms = start.elapsed().as_millis() as u64,
        row_count = diff.rows.len()
    );

    diff
}

/// Compute a schema diff from raw JSON column maps.
///
/// # Errors
///
/// - `InvalidColumnMap`: either side fails [`parse_column_map_bytes`]
/// - `DeterminismViolation`: the diff fails its JSON round-trip check
///   (should never occur in correct builds)
pub fn compute_schema_diff_bytes(
    base_bytes: &[u8],
    current_bytes: &[u8],
) -> std::result::Result<SchemaDiff, ExError> {
    let base = parse_column_map_bytes(base_bytes).map_err(|e| e.with_entity_id("base"))?;
    let current =
        parse_column_map_bytes(current_bytes).map_err(|e| e.with_entity_id("current"))?;

    let diff = compute_schema_diff(Some(&base), Some(&current));

    // Determinism guard: round-trip through JSON must produce an equal struct
    let serialized = serde_json::to_string(&diff).map_err(|e| {
        ExError::new(ExErrorKind::DeterminismViolation)
            .with_op("compute_schema_diff_bytes")
            .with_message(format!("failed to serialize diff: {}", e))
    })?;
    let reparsed: SchemaDiff = serde_json::from_str(&serialized).map_err(|e| {
        ExError::new(ExErrorKind::DeterminismViolation)
            .with_op("compute_schema_diff_bytes")
            .with_message(format!("failed to re-parse diff: {}", e))
    })?;
    if reparsed != diff {
        return Err(ExError::new(ExErrorKind::DeterminismViolation)
            .with_op("compute_schema_diff_bytes")
            .with_message("diff is not deterministic: round-trip produced different struct"));
    }

    Ok(diff)
}
