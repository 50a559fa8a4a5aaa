//! Schema column merge.
//!
//! [`merge_schema_columns`] aligns two ordered column maps by name and
//! classifies every column. It is total: absent inputs are empty maps, and
//! absent (`None`) entries never receive an index.

use crate::diff::model::{ColumnStatus, MergedColumnRow};
use crate::model::column::ColumnMap;
use std::collections::{HashMap, HashSet};

/// Presence of a key across the two raw key lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    /// Listed in current only
    Added,
    /// Listed in base only
    Removed,
    /// Listed on both sides
    Common,
}

/// Union of two key lists with per-key presence.
///
/// Order: base keys in base order, then current-only keys in current order.
/// Duplicate keys within a side are reported once.
pub fn merge_keys_with_status<'a>(
    base_keys: &[&'a str],
    current_keys: &[&'a str],
) -> Vec<(&'a str, KeyStatus)> {
    let base_set: HashSet<&str> = base_keys.iter().copied().collect();
    let current_set: HashSet<&str> = current_keys.iter().copied().collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(base_set.len() + current_set.len());
    let mut merged = Vec::with_capacity(base_set.len() + current_set.len());

    for &key in base_keys {
        if seen.insert(key) {
            let status = if current_set.contains(key) {
                KeyStatus::Common
            } else {
                KeyStatus::Removed
            };
            merged.push((key, status));
        }
    }
    for &key in current_keys {
        if seen.insert(key) {
            merged.push((key, KeyStatus::Added));
        }
    }
    merged
}

/// Assign 1-based indices to the present columns of one side.
fn index_side(columns: &ColumnMap) -> HashMap<&str, (usize, Option<&str>)> {
    columns
        .present()
        .enumerate()
        .map(|(i, (name, column))| (name, (i + 1, column.column_type.as_deref())))
        .collect()
}

/// Index and type of `name` on one side; a key not listed there has none.
fn position<'m>(
    positions: &HashMap<&str, (usize, Option<&'m str>)>,
    name: &str,
    listed: bool,
) -> (Option<usize>, Option<&'m str>) {
    if !listed {
        return (None, None);
    }
    positions
        .get(name)
        .map_or((None, None), |&(i, t)| (Some(i), t))
}

/// Merge two column maps into one diff row per name, in union order.
///
/// `None` for either side is treated as an empty map. Names listed only as
/// absent on every side they appear in produce no row.
pub fn merge_schema_columns(
    base: Option<&ColumnMap>,
    current: Option<&ColumnMap>,
) -> Vec<MergedColumnRow> {
    let empty = ColumnMap::new();
    let base = base.unwrap_or(&empty);
    let current = current.unwrap_or(&empty);

    let base_keys: Vec<&str> = base.keys().collect();
    let current_keys: Vec<&str> = current.keys().collect();

    let base_positions = index_side(base);
    let current_positions = index_side(current);

    merge_keys_with_status(&base_keys, &current_keys)
        .into_iter()
        .filter_map(|(name, key_status)| {
            let (base_index, base_type) =
                position(&base_positions, name, key_status != KeyStatus::Added);
            let (current_index, current_type) =
                position(&current_positions, name, key_status != KeyStatus::Removed);
            debug_assert!(
                key_status != KeyStatus::Added || !base_positions.contains_key(name),
                "column {} reported added but indexed in base",
                name
            );
            debug_assert!(
                key_status != KeyStatus::Removed || !current_positions.contains_key(name),
                "column {} reported removed but indexed in current",
                name
            );

            let status =
                ColumnStatus::derive(base_index, current_index, base_type == current_type)?;
            let reordered = matches!(
                (base_index, current_index),
                (Some(b), Some(c)) if b != c
            );

            Some(MergedColumnRow {
                name: name.to_string(),
                base_index,
                current_index,
                base_type: base_type.map(str::to_string),
                current_type: current_type.map(str::to_string),
                status,
                reordered,
            })
        })
        .collect()
}
