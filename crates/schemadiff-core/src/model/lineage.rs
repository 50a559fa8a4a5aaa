//! Lineage graph types consumed by the change-summary aggregator.

use crate::errors::{ExError, Result, SchemaDiffError};
use crate::model::column::ColumnMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node-level change classification assigned upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeChangeTag {
    Added,
    Removed,
    Modified,
}

/// A single model/node of the lineage graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub change_status: Option<NodeChangeTag>,
    #[serde(default)]
    pub base_columns: Option<ColumnMap>,
    #[serde(default)]
    pub current_columns: Option<ColumnMap>,
}

impl LineageNode {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            change_status: None,
            base_columns: None,
            current_columns: None,
        }
    }

    pub fn with_change_status(mut self, tag: NodeChangeTag) -> Self {
        self.change_status = Some(tag);
        self
    }

    pub fn with_base_columns(mut self, columns: ColumnMap) -> Self {
        self.base_columns = Some(columns);
        self
    }

    pub fn with_current_columns(mut self, columns: ColumnMap) -> Self {
        self.current_columns = Some(columns);
        self
    }
}

/// Lineage graph: all nodes keyed by id, plus the ids tagged as modified.
///
/// `modified_set` keeps the order it was supplied in; ids that do not
/// resolve to a node are tolerated and skipped by the aggregator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineageGraph {
    #[serde(default)]
    pub nodes: BTreeMap<String, LineageNode>,
    #[serde(default)]
    pub modified_set: Vec<String>,
}

impl LineageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node keyed by its own id
    pub fn insert_node(&mut self, node: LineageNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Add an id to the modified set (duplicates are ignored)
    pub fn mark_modified(&mut self, node_id: impl Into<String>) {
        let node_id = node_id.into();
        if !self.modified_set.contains(&node_id) {
            self.modified_set.push(node_id);
        }
    }

    /// # Errors
    ///
    /// Returns `SchemaDiffError::NodeNotFound` if no node has this id.
    pub fn node(&self, node_id: &str) -> Result<&LineageNode> {
        self.nodes
            .get(node_id)
            .ok_or_else(|| SchemaDiffError::NodeNotFound {
                node_id: node_id.to_string(),
            })
    }

    /// Resolved modified nodes, in `modified_set` order, skipping unknown ids
    pub fn modified_nodes(&self) -> impl Iterator<Item = &LineageNode> {
        self.modified_set.iter().filter_map(|id| self.nodes.get(id))
    }
}

/// Parse JSON text into a [`LineageGraph`].
///
/// Each node's `id` defaults to its key in `nodes` when omitted or empty.
///
/// # Errors
///
/// Returns `SchemaDiffError::InvalidLineage` if the text does not match the
/// `{nodes, modified_set}` shape.
pub fn lineage_from_str(text: &str) -> Result<LineageGraph> {
    let mut graph: LineageGraph =
        serde_json::from_str(text).map_err(|e| SchemaDiffError::InvalidLineage {
            reason: format!("failed to deserialize lineage: {}", e),
        })?;

    for (key, node) in graph.nodes.iter_mut() {
        if node.id.is_empty() {
            node.id = key.clone();
        }
        if node.name.is_empty() {
            node.name = node.id.clone();
        }
    }
    Ok(graph)
}

/// Parse raw JSON bytes into a [`LineageGraph`].
///
/// # Errors
///
/// - `InvalidLineage`: bytes are not UTF-8, or [`lineage_from_str`] rejects
///   the text
pub fn parse_lineage_bytes(bytes: &[u8]) -> std::result::Result<LineageGraph, ExError> {
    std::str::from_utf8(bytes)
        .map_err(|e| SchemaDiffError::InvalidLineage {
            reason: format!("lineage is not valid UTF-8: {}", e),
        })
        .and_then(lineage_from_str)
        .map_err(|e| ExError::from(e).with_op("parse_lineage_bytes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_node_lookup_missing_is_not_found() {
        let graph = LineageGraph::new();
        let err = graph.node("model.x").unwrap_err();
        assert_eq!(
            err,
            SchemaDiffError::NodeNotFound {
                node_id: "model.x".to_string()
            }
        );
    }

    #[test]
    fn test_mark_modified_deduplicates() {
        let mut graph = LineageGraph::new();
        graph.mark_modified("a");
        graph.mark_modified("b");
        graph.mark_modified("a");
        assert_eq!(graph.modified_set, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_modified_nodes_skips_unknown_ids() {
        let mut graph = LineageGraph::new();
        graph.insert_node(LineageNode::new("a").with_change_status(NodeChangeTag::Added));
        graph.mark_modified("ghost");
        graph.mark_modified("a");
        let ids: Vec<&str> = graph.modified_nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_parse_lineage_fills_ids_from_keys() {
        let json = br#"{
            "nodes": {
                "model.orders": {
                    "change_status": "modified",
                    "base_columns": {"id": {"type": "INT"}},
                    "current_columns": {"id": {"type": "BIGINT"}, "total": null}
                }
            },
            "modified_set": ["model.orders"]
        }"#;
        let graph = parse_lineage_bytes(json).unwrap();
        let node = graph.node("model.orders").unwrap();
        assert_eq!(node.id, "model.orders");
        assert_eq!(node.name, "model.orders");
        assert_eq!(node.change_status, Some(NodeChangeTag::Modified));
        assert_eq!(node.current_columns.as_ref().map(|c| c.len()), Some(2));
    }

    #[test]
    fn test_parse_lineage_rejects_unknown_tag() {
        let json = br#"{"nodes": {"a": {"change_status": "renamed"}}, "modified_set": []}"#;
        let err = parse_lineage_bytes(json).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidLineage);
    }

    #[test]
    fn test_lineage_from_str_raises_domain_variant() {
        let err = lineage_from_str(r#"{"nodes": [], "modified_set": []}"#).unwrap_err();
        assert!(matches!(err, SchemaDiffError::InvalidLineage { .. }));

        let ex_err = parse_lineage_bytes(&[0xff]).unwrap_err();
        assert_eq!(ex_err.kind(), ExErrorKind::InvalidLineage);
        assert!(ex_err.message().contains("UTF-8"));
    }

    #[test]
    fn test_change_tag_serde_is_snake_case() {
        let json = serde_json::to_string(&NodeChangeTag::Modified).unwrap();
        assert_eq!(json, "\"modified\"");
    }
}
