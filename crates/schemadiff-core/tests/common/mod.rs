use schemadiff_core::model::{ColumnMap, ColumnSchema};
use schemadiff_core::MergedColumnRow;

/// Build a column map from `(name, type)` pairs in order
#[allow(dead_code)]
pub fn cols(pairs: &[(&str, &str)]) -> ColumnMap {
    pairs
        .iter()
        .map(|(name, ty)| (*name, Some(ColumnSchema::typed(*ty))))
        .collect()
}

/// Find a merged row by exact name
///
/// # Panics
///
/// Panics if no row has this name.
#[allow(dead_code)]
pub fn row<'a>(rows: &'a [MergedColumnRow], name: &str) -> &'a MergedColumnRow {
    rows.iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no row named {:?} in {:?}", name, rows))
}
