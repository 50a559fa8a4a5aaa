pub mod column;
pub mod lineage;

pub use column::{ColumnMap, ColumnSchema};
pub use lineage::{lineage_from_str, parse_lineage_bytes, LineageGraph, LineageNode, NodeChangeTag};
