//! Fluent builder for workflow graphs
//!
//! A programmatic way to construct graphs for fixtures, tests, and
//! import paths, bypassing the gesture pipeline.

use crate::types::{NodeKind, Position, WorkflowEdge, WorkflowGraph, WorkflowNode};

/// Fluent builder for constructing workflow graphs
///
/// # Example
///
/// ```ignore
/// let graph = GraphBuilder::new("My Workflow")
///     .add_node("node-1", "webhook", NodeKind::Trigger, (0.0, 0.0))
///     .add_node("node-2", "send-email", NodeKind::Action, (0.0, 140.0))
///     .add_edge("node-1", "node-2")
///     .build();
/// ```
pub struct GraphBuilder {
    graph: WorkflowGraph,
    edge_counter: usize,
}

impl GraphBuilder {
    /// Create a new builder for a named workflow
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: WorkflowGraph::new(name),
            edge_counter: 0,
        }
    }

    /// Set the workflow description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.graph.description = description.into();
        self
    }

    /// Mark the workflow active
    pub fn active(mut self, is_active: bool) -> Self {
        self.graph.is_active = is_active;
        self
    }

    /// Add a node with an explicit id
    pub fn add_node(
        mut self,
        id: impl Into<String>,
        archetype: impl Into<String>,
        kind: NodeKind,
        position: (f64, f64),
    ) -> Self {
        let id = id.into();
        self.graph.nodes.push(WorkflowNode {
            label: id.clone(),
            id,
            archetype: archetype.into(),
            position: Position::new(position.0, position.1),
            description: String::new(),
            kind,
            config: serde_json::Map::new(),
            is_configured: false,
        });
        self
    }

    /// Set the label on the most recently added node
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        if let Some(node) = self.graph.nodes.last_mut() {
            node.label = label.into();
        }
        self
    }

    /// Set the config on the most recently added node
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        if let Some(node) = self.graph.nodes.last_mut() {
            if let serde_json::Value::Object(map) = config {
                node.config = map;
            }
        }
        self
    }

    /// Add an edge between two nodes (auto-generates the edge id)
    pub fn add_edge(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.edge_counter += 1;
        self.graph.edges.push(WorkflowEdge {
            id: format!("edge-{}", self.edge_counter),
            source: source.into(),
            target: target.into(),
        });
        self
    }

    /// Build the graph without validation
    pub fn build(self) -> WorkflowGraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let graph = GraphBuilder::new("Test Workflow")
            .description("fixture")
            .add_node("node-1", "webhook", NodeKind::Trigger, (0.0, 0.0))
            .with_label("Incoming Hook")
            .with_config(serde_json::json!({"method": "POST"}))
            .add_node("node-2", "send-email", NodeKind::Action, (0.0, 140.0))
            .add_edge("node-1", "node-2")
            .build();

        assert_eq!(graph.name, "Test Workflow");
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.nodes[0].label, "Incoming Hook");
        assert_eq!(graph.nodes[0].config.get("method").unwrap(), "POST");
    }

    #[test]
    fn test_builder_auto_edge_ids() {
        let graph = GraphBuilder::new("Test")
            .add_node("a", "webhook", NodeKind::Trigger, (0.0, 0.0))
            .add_node("b", "delay", NodeKind::Logic, (0.0, 140.0))
            .add_node("c", "send-email", NodeKind::Action, (0.0, 280.0))
            .add_edge("a", "b")
            .add_edge("b", "c")
            .build();

        assert_eq!(graph.edges[0].id, "edge-1");
        assert_eq!(graph.edges[1].id, "edge-2");
    }
}
