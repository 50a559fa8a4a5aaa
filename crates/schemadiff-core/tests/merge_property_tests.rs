//! Property tests for the column merge and grid shaping.
//!
//! Column maps are generated from a small name alphabet so that overlaps,
//! duplicates and absent (`null`) entries are frequent.

use proptest::prelude::*;
use schemadiff_core::diff::merge::merge_schema_columns;
use schemadiff_core::model::{ColumnMap, ColumnSchema};
use schemadiff_core::summary::{calculate_change_summary, ChangeSummary};
use schemadiff_core::{to_schema_data_grid, ColumnStatus, GridOptions, LineageNode};
use std::collections::HashSet;

fn column_map() -> impl Strategy<Value = ColumnMap> {
    let name = prop::sample::select(vec!["id", "ID", "name", "age", "email", "total", "", "列"]);
    let ty = prop::option::weighted(
        0.8,
        prop::sample::select(vec!["INT", "BIGINT", "VARCHAR", "DECIMAL"]),
    );
    prop::collection::vec((name, ty), 0..10).prop_map(|entries| {
        let mut map = ColumnMap::new();
        for (name, ty) in entries {
            map.insert(name, ty.map(ColumnSchema::typed));
        }
        map
    })
}

fn present_names(map: &ColumnMap) -> Vec<String> {
    map.present().map(|(name, _)| name.to_string()).collect()
}

proptest! {
    /// Every name present on some side yields exactly one row, and no other row exists.
    #[test]
    fn prop_union_is_complete(base in column_map(), current in column_map()) {
        let rows = merge_schema_columns(Some(&base), Some(&current));

        let expected: HashSet<String> = present_names(&base)
            .into_iter()
            .chain(present_names(&current))
            .collect();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        let unique: HashSet<&str> = names.iter().copied().collect();

        prop_assert_eq!(names.len(), unique.len(), "duplicate row names: {:?}", names);
        prop_assert_eq!(unique.len(), expected.len());
        for name in &expected {
            prop_assert!(unique.contains(name.as_str()), "missing row for {:?}", name);
        }
    }

    /// Indices are dense 1-based positions that reproduce each side's order.
    #[test]
    fn prop_indices_follow_schema_order(base in column_map(), current in column_map()) {
        let rows = merge_schema_columns(Some(&base), Some(&current));

        let mut by_base: Vec<(usize, &str)> = rows
            .iter()
            .filter_map(|r| r.base_index.map(|i| (i, r.name.as_str())))
            .collect();
        by_base.sort();
        let base_order: Vec<String> = by_base.iter().map(|(_, n)| n.to_string()).collect();
        prop_assert_eq!(&base_order, &present_names(&base));
        for (pos, (index, _)) in by_base.iter().enumerate() {
            prop_assert_eq!(*index, pos + 1);
        }

        let mut by_current: Vec<(usize, &str)> = rows
            .iter()
            .filter_map(|r| r.current_index.map(|i| (i, r.name.as_str())))
            .collect();
        by_current.sort();
        let current_order: Vec<String> = by_current.iter().map(|(_, n)| n.to_string()).collect();
        prop_assert_eq!(&current_order, &present_names(&current));
        for (pos, (index, _)) in by_current.iter().enumerate() {
            prop_assert_eq!(*index, pos + 1);
        }
    }

    /// Grid rows are ordered by `current_index ?? base_index`.
    #[test]
    fn prop_grid_order_is_non_decreasing(
        base in column_map(),
        current in column_map(),
        changed_only in any::<bool>(),
    ) {
        let grid = to_schema_data_grid(Some(&base), Some(&current), &GridOptions { changed_only });

        let keys: Vec<usize> = grid.rows.iter().map(|r| r.row.effective_index()).collect();
        for pair in keys.windows(2) {
            prop_assert!(pair[0] <= pair[1], "grid keys out of order: {:?}", keys);
        }
        if changed_only {
            prop_assert!(grid.rows.iter().all(|r| r.row.status != ColumnStatus::Unchanged));
        }
    }

    /// Status is a total function of presence, type equality and position.
    #[test]
    fn prop_status_is_total(base in column_map(), current in column_map()) {
        for row in merge_schema_columns(Some(&base), Some(&current)) {
            let expected = match (row.base_index, row.current_index) {
                (None, None) => None,
                (None, Some(_)) => Some(ColumnStatus::Added),
                (Some(_), None) => Some(ColumnStatus::Removed),
                (Some(_), Some(_)) if row.base_type != row.current_type => {
                    Some(ColumnStatus::Modified)
                }
                (Some(b), Some(c)) if b != c => Some(ColumnStatus::Reordered),
                (Some(_), Some(_)) => Some(ColumnStatus::Unchanged),
            };
            prop_assert_eq!(Some(row.status), expected, "row {:?}", row);
            prop_assert_eq!(
                row.reordered,
                matches!((row.base_index, row.current_index), (Some(b), Some(c)) if b != c)
            );
        }
    }

    /// Summing per-chunk summaries equals summarizing everything at once.
    #[test]
    fn prop_change_summary_is_additive(
        sides in prop::collection::vec((column_map(), column_map()), 0..8),
        split in 0usize..8,
    ) {
        let nodes: Vec<LineageNode> = sides
            .into_iter()
            .enumerate()
            .map(|(i, (base, current))| {
                LineageNode::new(format!("model.n{}", i))
                    .with_base_columns(base)
                    .with_current_columns(current)
            })
            .collect();
        let split = split.min(nodes.len());

        let whole = calculate_change_summary(&nodes);
        let (left, right) = nodes.split_at(split);
        let parts: ChangeSummary = [calculate_change_summary(left), calculate_change_summary(right)]
            .into_iter()
            .sum();

        prop_assert_eq!(whole, parts);
    }
}
