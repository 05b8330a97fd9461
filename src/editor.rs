//! Graph editor: the mutation operations behind the canvas
//!
//! All mutations run synchronously on the UI thread and either apply
//! fully or reject without touching the graph. The editor's core
//! invariant is referential integrity: no edge ever references a node
//! that is not in the node set.

use std::sync::Arc;

use crate::catalog::ArchetypeCatalog;
use crate::error::{Result, StudioError};
use crate::types::{NodeId, NodeKind, Position, WorkflowEdge, WorkflowGraph, WorkflowNode};

/// Canvas offset applied to duplicated nodes so the copy is visible
pub const DUPLICATE_OFFSET: (f64, f64) = (50.0, 50.0);

/// The mutable workflow graph plus the id allocators that keep node and
/// edge ids unique for the life of the session (ids are never reused,
/// even after deletion).
pub struct GraphEditor {
    graph: WorkflowGraph,
    catalog: Arc<ArchetypeCatalog>,
    node_counter: usize,
    edge_counter: usize,
}

impl GraphEditor {
    /// Create an editor over an empty graph
    pub fn new(name: impl Into<String>, catalog: Arc<ArchetypeCatalog>) -> Self {
        Self {
            graph: WorkflowGraph::new(name),
            catalog,
            node_counter: 0,
            edge_counter: 0,
        }
    }

    /// Create an editor over an existing graph (template adoption, load)
    ///
    /// Counters resume past the highest numeric suffix already present so
    /// newly allocated ids never collide with loaded ones.
    pub fn from_graph(graph: WorkflowGraph, catalog: Arc<ArchetypeCatalog>) -> Self {
        let node_counter = max_suffix(graph.nodes.iter().map(|n| n.id.as_str()), "node-");
        let edge_counter = max_suffix(graph.edges.iter().map(|e| e.id.as_str()), "edge-");
        Self {
            graph,
            catalog,
            node_counter,
            edge_counter,
        }
    }

    /// The current graph
    pub fn graph(&self) -> &WorkflowGraph {
        &self.graph
    }

    /// The archetype catalog this editor instantiates from
    pub fn catalog(&self) -> &ArchetypeCatalog {
        &self.catalog
    }

    /// Consume the editor, returning the graph (for saving)
    pub fn into_graph(self) -> WorkflowGraph {
        self.graph
    }

    fn next_node_id(&mut self) -> NodeId {
        self.node_counter += 1;
        format!("node-{}", self.node_counter)
    }

    fn next_edge_id(&mut self) -> String {
        self.edge_counter += 1;
        format!("edge-{}", self.edge_counter)
    }

    /// Instantiate an archetype at the given canvas position
    ///
    /// The archetype's default config is cloned into the new node, so
    /// later edits to this instance never leak into siblings. Selection
    /// is not changed by this operation.
    pub fn add_node(&mut self, archetype_id: &str, position: Position) -> Result<&WorkflowNode> {
        let archetype = self.catalog.get(archetype_id).cloned().ok_or_else(|| {
            log::warn!("add_node rejected: unknown archetype '{}'", archetype_id);
            StudioError::UnknownArchetype(archetype_id.to_string())
        })?;

        let id = self.next_node_id();
        self.graph.nodes.push(WorkflowNode {
            id,
            archetype: archetype.id.clone(),
            position,
            label: archetype.label.clone(),
            description: archetype.description.clone(),
            kind: archetype.kind,
            config: archetype.default_config.clone(),
            is_configured: false,
        });
        Ok(self.graph.nodes.last().expect("node just pushed"))
    }

    /// Move a node to a new canvas position
    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<()> {
        let node = self.graph.find_node_mut(node_id).ok_or_else(|| {
            log::warn!("move_node rejected: node '{}' not found", node_id);
            StudioError::NodeNotFound(node_id.to_string())
        })?;
        node.position = position;
        Ok(())
    }

    /// Connect two existing nodes with a directed edge
    ///
    /// Self-loops and duplicate edges are allowed; the only requirement
    /// is that both endpoints exist.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<&WorkflowEdge> {
        for endpoint in [source, target] {
            if !self.graph.contains_node(endpoint) {
                log::warn!("connect rejected: node '{}' not found", endpoint);
                return Err(StudioError::NodeNotFound(endpoint.to_string()));
            }
        }

        let id = self.next_edge_id();
        self.graph.edges.push(WorkflowEdge {
            id,
            source: source.to_string(),
            target: target.to_string(),
        });
        Ok(self.graph.edges.last().expect("edge just pushed"))
    }

    /// Delete a node and, atomically, every edge touching it
    pub fn delete_node(&mut self, node_id: &str) -> Result<WorkflowNode> {
        let index = self
            .graph
            .nodes
            .iter()
            .position(|n| n.id == node_id)
            .ok_or_else(|| {
                log::warn!("delete_node rejected: node '{}' not found", node_id);
                StudioError::NodeNotFound(node_id.to_string())
            })?;

        let removed = self.graph.nodes.remove(index);
        self.graph
            .edges
            .retain(|e| e.source != node_id && e.target != node_id);
        Ok(removed)
    }

    /// Create a copy of a node with a fresh id and an offset position
    ///
    /// Label, description, kind, and config are deep-copied; edges are
    /// not duplicated.
    pub fn duplicate_node(&mut self, node_id: &str) -> Result<&WorkflowNode> {
        let original = self
            .graph
            .find_node(node_id)
            .cloned()
            .ok_or_else(|| {
                log::warn!("duplicate_node rejected: node '{}' not found", node_id);
                StudioError::NodeNotFound(node_id.to_string())
            })?;

        let id = self.next_node_id();
        self.graph.nodes.push(WorkflowNode {
            id,
            position: original
                .position
                .offset(DUPLICATE_OFFSET.0, DUPLICATE_OFFSET.1),
            ..original
        });
        Ok(self.graph.nodes.last().expect("node just pushed"))
    }

    /// Merge a patch into a node's config and mark it configured
    ///
    /// Keys in the patch overwrite matching keys in the config; other
    /// keys are left alone.
    pub fn update_node_config(
        &mut self,
        node_id: &str,
        patch: serde_json::Map<String, serde_json::Value>,
    ) -> Result<()> {
        let node = self.graph.find_node_mut(node_id).ok_or_else(|| {
            log::warn!("update_node_config rejected: node '{}' not found", node_id);
            StudioError::NodeNotFound(node_id.to_string())
        })?;
        for (key, value) in patch {
            node.config.insert(key, value);
        }
        node.is_configured = true;
        Ok(())
    }

    /// Update a node's editable display fields (label, kind, description)
    pub fn update_node_details(
        &mut self,
        node_id: &str,
        label: String,
        kind: NodeKind,
        description: String,
    ) -> Result<()> {
        let node = self.graph.find_node_mut(node_id).ok_or_else(|| {
            log::warn!("update_node_details rejected: node '{}' not found", node_id);
            StudioError::NodeNotFound(node_id.to_string())
        })?;
        node.label = label;
        node.kind = kind;
        node.description = description;
        Ok(())
    }
}

/// Highest numeric suffix among ids of the form `{prefix}{n}`
fn max_suffix<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> usize {
    ids.filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|rest| rest.parse::<usize>().ok())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeKind;

    fn editor() -> GraphEditor {
        GraphEditor::new("Test", Arc::new(ArchetypeCatalog::built_in()))
    }

    #[test]
    fn test_add_node_from_archetype() {
        let mut ed = editor();
        let node = ed.add_node("webhook", Position::new(100.0, 100.0)).unwrap();
        assert_eq!(node.kind, NodeKind::Trigger);
        assert_eq!(node.archetype, "webhook");
        assert!(!node.is_configured);
        assert_eq!(node.config.get("method").unwrap(), "POST");
    }

    #[test]
    fn test_add_node_unknown_archetype() {
        let mut ed = editor();
        let err = ed.add_node("nope", Position::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(err, StudioError::UnknownArchetype(_)));
        assert!(ed.graph().nodes.is_empty());
    }

    #[test]
    fn test_configs_are_independent_copies() {
        let mut ed = editor();
        let a = ed.add_node("webhook", Position::new(0.0, 0.0)).unwrap().id.clone();
        let b = ed.add_node("webhook", Position::new(50.0, 0.0)).unwrap().id.clone();

        let mut patch = serde_json::Map::new();
        patch.insert("method".to_string(), serde_json::json!("PUT"));
        ed.update_node_config(&a, patch).unwrap();

        assert_eq!(
            ed.graph().find_node(&a).unwrap().config.get("method").unwrap(),
            "PUT"
        );
        assert_eq!(
            ed.graph().find_node(&b).unwrap().config.get("method").unwrap(),
            "POST"
        );
    }

    #[test]
    fn test_connect_missing_target_leaves_graph_unchanged() {
        let mut ed = editor();
        ed.add_node("webhook", Position::new(100.0, 100.0)).unwrap();
        let node_id = ed.graph().nodes[0].id.clone();

        let err = ed.connect(&node_id, "ghost").unwrap_err();
        assert!(matches!(err, StudioError::NodeNotFound(id) if id == "ghost"));
        assert_eq!(ed.graph().nodes.len(), 1);
        assert_eq!(ed.graph().edges.len(), 0);
    }

    #[test]
    fn test_connect_allows_self_loops_and_duplicates() {
        let mut ed = editor();
        let id = ed.add_node("condition", Position::new(0.0, 0.0)).unwrap().id.clone();

        ed.connect(&id, &id).unwrap();
        ed.connect(&id, &id).unwrap();
        assert_eq!(ed.graph().edges.len(), 2);
    }

    #[test]
    fn test_delete_node_cascades_edges() {
        let mut ed = editor();
        let a = ed.add_node("webhook", Position::new(0.0, 0.0)).unwrap().id.clone();
        let b = ed.add_node("send-email", Position::new(200.0, 0.0)).unwrap().id.clone();
        let c = ed.add_node("condition", Position::new(400.0, 0.0)).unwrap().id.clone();
        ed.connect(&a, &b).unwrap();
        ed.connect(&b, &c).unwrap();
        ed.connect(&a, &c).unwrap();

        ed.delete_node(&b).unwrap();

        assert_eq!(ed.graph().nodes.len(), 2);
        assert_eq!(ed.graph().edges.len(), 1);
        assert!(ed.graph().dangling_edges().is_empty());
        assert!(ed
            .graph()
            .edges
            .iter()
            .all(|e| e.source != b && e.target != b));
    }

    #[test]
    fn test_move_node() {
        let mut ed = editor();
        let id = ed.add_node("delay", Position::new(0.0, 0.0)).unwrap().id.clone();
        ed.move_node(&id, Position::new(320.0, 40.0)).unwrap();
        let node = ed.graph().find_node(&id).unwrap();
        assert_eq!(node.position, Position::new(320.0, 40.0));
    }

    #[test]
    fn test_duplicate_node() {
        let mut ed = editor();
        let id = ed.add_node("ai-completion", Position::new(10.0, 20.0)).unwrap().id.clone();
        let mut patch = serde_json::Map::new();
        patch.insert("model".to_string(), serde_json::json!("claude-3"));
        ed.update_node_config(&id, patch).unwrap();

        let copy_id = ed.duplicate_node(&id).unwrap().id.clone();
        assert_ne!(copy_id, id);

        let original = ed.graph().find_node(&id).unwrap().clone();
        let copy = ed.graph().find_node(&copy_id).unwrap();
        assert_eq!(copy.label, original.label);
        assert_eq!(copy.kind, original.kind);
        assert_eq!(copy.config, original.config);
        assert_eq!(copy.position, Position::new(60.0, 70.0));
    }

    #[test]
    fn test_duplicate_does_not_copy_edges() {
        let mut ed = editor();
        let a = ed.add_node("webhook", Position::new(0.0, 0.0)).unwrap().id.clone();
        let b = ed.add_node("send-email", Position::new(200.0, 0.0)).unwrap().id.clone();
        ed.connect(&a, &b).unwrap();

        ed.duplicate_node(&b).unwrap();
        assert_eq!(ed.graph().edges.len(), 1);
    }

    #[test]
    fn test_node_ids_never_reused() {
        let mut ed = editor();
        let first = ed.add_node("webhook", Position::new(0.0, 0.0)).unwrap().id.clone();
        ed.delete_node(&first).unwrap();
        let second = ed.add_node("webhook", Position::new(0.0, 0.0)).unwrap().id.clone();
        assert_ne!(first, second);
    }

    #[test]
    fn test_from_graph_resumes_counters() {
        let mut ed = editor();
        ed.add_node("webhook", Position::new(0.0, 0.0)).unwrap();
        ed.add_node("delay", Position::new(0.0, 100.0)).unwrap();
        let graph = ed.into_graph();

        let mut resumed = GraphEditor::from_graph(graph, Arc::new(ArchetypeCatalog::built_in()));
        let new_id = resumed.add_node("webhook", Position::new(0.0, 200.0)).unwrap().id.clone();
        assert_eq!(new_id, "node-3");
    }

    #[test]
    fn test_update_config_marks_configured() {
        let mut ed = editor();
        let id = ed.add_node("send-email", Position::new(0.0, 0.0)).unwrap().id.clone();
        assert!(!ed.graph().find_node(&id).unwrap().is_configured);

        ed.update_node_config(&id, serde_json::Map::new()).unwrap();
        assert!(ed.graph().find_node(&id).unwrap().is_configured);
    }
}
