//! Core types for workflow graphs
//!
//! These types define the structure of a workflow graph as edited on the
//! canvas: node instances, edges, positions, and the graph aggregate with
//! its workflow-level metadata.

use serde::{Deserialize, Serialize};

/// Unique identifier for a node instance
pub type NodeId = String;

/// Unique identifier for an edge
pub type EdgeId = String;

/// The kind of a workflow node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Entry points that start a workflow (webhook, schedule, ...)
    Trigger,
    /// Steps that do work (send email, call an API, run a model)
    Action,
    /// Control flow (conditions, delays, branches)
    Logic,
}

impl NodeKind {
    /// Human-readable label for palette and side panel headings
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Trigger => "Trigger",
            NodeKind::Action => "Action",
            NodeKind::Logic => "Logic",
        }
    }
}

/// A point in canvas space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this position shifted by the given deltas
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A node instance in a workflow graph
///
/// Created from an archetype at drop time or from a template step.
/// `config` is an independent copy of the archetype default; mutating it
/// never affects other instances of the same archetype.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    /// Unique identifier, generated at creation, never reused
    pub id: NodeId,
    /// Id of the archetype this node was created from (display only)
    pub archetype: String,
    /// Position in canvas space
    pub position: Position,
    /// Editable display label
    pub label: String,
    /// Editable free-text description
    #[serde(default)]
    pub description: String,
    /// Node kind (drives the display category)
    pub kind: NodeKind,
    /// Instance configuration, independently mutable per node
    #[serde(default)]
    pub config: serde_json::Map<String, serde_json::Value>,
    /// True once a user has opened and saved this node's configuration
    #[serde(default)]
    pub is_configured: bool,
}

/// An edge connecting two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    /// Unique identifier for this edge
    pub id: EdgeId,
    /// Source node ID
    pub source: NodeId,
    /// Target node ID
    pub target: NodeId,
}

/// A complete workflow graph with its workflow-level metadata
///
/// One live graph exists per builder session; it is replaced wholesale
/// when a template is adopted or a blank workflow is started.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowGraph {
    /// Workflow name
    pub name: String,
    /// Workflow description
    #[serde(default)]
    pub description: String,
    /// Whether the workflow is active
    #[serde(default)]
    pub is_active: bool,
    /// Nodes in the graph
    pub nodes: Vec<WorkflowNode>,
    /// Edges connecting nodes
    pub edges: Vec<WorkflowEdge>,
}

impl WorkflowGraph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Find a node by ID
    pub fn find_node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Find a node by ID (mutable)
    pub fn find_node_mut(&mut self, id: &str) -> Option<&mut WorkflowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Check whether a node with the given ID exists
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Get edges coming into a node
    pub fn incoming_edges<'a>(
        &'a self,
        node_id: &'a str,
    ) -> impl Iterator<Item = &'a WorkflowEdge> + 'a {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    /// Get edges going out of a node
    pub fn outgoing_edges<'a>(
        &'a self,
        node_id: &'a str,
    ) -> impl Iterator<Item = &'a WorkflowEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == node_id)
    }

    /// Collect edges whose source or target no longer exists
    ///
    /// The editor keeps this empty by construction; the check exists for
    /// template import and tests.
    pub fn dangling_edges(&self) -> Vec<&WorkflowEdge> {
        self.edges
            .iter()
            .filter(|e| !self.contains_node(&e.source) || !self.contains_node(&e.target))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> WorkflowNode {
        WorkflowNode {
            id: id.to_string(),
            archetype: "webhook".to_string(),
            position: Position::new(0.0, 0.0),
            label: id.to_string(),
            description: String::new(),
            kind: NodeKind::Trigger,
            config: serde_json::Map::new(),
            is_configured: false,
        }
    }

    #[test]
    fn test_edge_lookups() {
        let mut graph = WorkflowGraph::new("Test");
        graph.nodes.push(node("a"));
        graph.nodes.push(node("b"));
        graph.edges.push(WorkflowEdge {
            id: "edge-1".to_string(),
            source: "a".to_string(),
            target: "b".to_string(),
        });

        assert_eq!(graph.outgoing_edges("a").count(), 1);
        assert_eq!(graph.incoming_edges("b").count(), 1);
        assert_eq!(graph.incoming_edges("a").count(), 0);
        assert!(graph.dangling_edges().is_empty());
    }

    #[test]
    fn test_dangling_edge_detection() {
        let mut graph = WorkflowGraph::new("Test");
        graph.nodes.push(node("a"));
        graph.edges.push(WorkflowEdge {
            id: "edge-1".to_string(),
            source: "a".to_string(),
            target: "ghost".to_string(),
        });

        let dangling = graph.dangling_edges();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].id, "edge-1");
    }

    #[test]
    fn test_serde_roundtrip_preserves_fields() {
        let mut graph = WorkflowGraph::new("Roundtrip");
        graph.description = "desc".to_string();
        graph.is_active = true;
        let mut n = node("a");
        n.config
            .insert("url".to_string(), serde_json::json!("https://example.com"));
        n.is_configured = true;
        graph.nodes.push(n);

        let json = serde_json::to_string(&graph).unwrap();
        let restored: WorkflowGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.name, "Roundtrip");
        assert!(restored.is_active);
        let rn = restored.find_node("a").unwrap();
        assert!(rn.is_configured);
        assert_eq!(rn.config.get("url").unwrap(), "https://example.com");
    }

    #[test]
    fn test_camel_case_serialization() {
        let n = node("a");
        let json = serde_json::to_string(&n).unwrap();
        assert!(json.contains("\"isConfigured\":false"));
        assert!(json.contains("\"kind\":\"trigger\""));
    }
}
