//! Single-node selection and the side-panel operations
//!
//! The builder has a single-selection model: at most one node is
//! selected at a time. Delete and duplicate act on the current
//! selection and are safe to call when nothing is selected.

use crate::editor::GraphEditor;
use crate::error::Result;
use crate::types::{NodeId, WorkflowNode};

/// Tracks the currently selected node, if any
#[derive(Debug, Default)]
pub struct Selection {
    current: Option<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a node by id, or pass None to clear (background click)
    pub fn select(&mut self, node_id: Option<NodeId>) {
        self.current = node_id;
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The currently selected node id
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Whether the given node is selected
    pub fn is_selected(&self, node_id: &str) -> bool {
        self.current.as_deref() == Some(node_id)
    }

    /// The selected node's data, for side-panel rendering
    pub fn selected_node<'a>(&self, editor: &'a GraphEditor) -> Option<&'a WorkflowNode> {
        self.current
            .as_deref()
            .and_then(|id| editor.graph().find_node(id))
    }

    /// Delete the selected node and clear the selection
    ///
    /// No-op when nothing is selected, so a second invocation in a row
    /// is harmless.
    pub fn delete_selected(&mut self, editor: &mut GraphEditor) -> Result<()> {
        let Some(id) = self.current.take() else {
            return Ok(());
        };
        editor.delete_node(&id)?;
        Ok(())
    }

    /// Duplicate the selected node and move the selection to the copy
    ///
    /// No-op when nothing is selected.
    pub fn duplicate_selected(&mut self, editor: &mut GraphEditor) -> Result<Option<NodeId>> {
        let Some(id) = self.current.clone() else {
            return Ok(None);
        };
        let copy_id = editor.duplicate_node(&id)?.id.clone();
        self.current = Some(copy_id.clone());
        Ok(Some(copy_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ArchetypeCatalog;
    use crate::types::Position;
    use std::sync::Arc;

    fn editor_with_node() -> (GraphEditor, NodeId) {
        let mut editor = GraphEditor::new("Test", Arc::new(ArchetypeCatalog::built_in()));
        let id = editor
            .add_node("webhook", Position::new(0.0, 0.0))
            .unwrap()
            .id
            .clone();
        (editor, id)
    }

    #[test]
    fn test_select_and_clear() {
        let (editor, id) = editor_with_node();
        let mut selection = Selection::new();

        selection.select(Some(id.clone()));
        assert!(selection.is_selected(&id));
        assert_eq!(selection.selected_node(&editor).unwrap().id, id);

        selection.select(None);
        assert!(selection.current().is_none());
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let (mut editor, id) = editor_with_node();
        let mut selection = Selection::new();
        selection.select(Some(id.clone()));

        selection.delete_selected(&mut editor).unwrap();
        assert!(selection.current().is_none());
        assert!(editor.graph().nodes.is_empty());
    }

    #[test]
    fn test_double_delete_is_noop() {
        let (mut editor, id) = editor_with_node();
        let mut selection = Selection::new();
        selection.select(Some(id));

        selection.delete_selected(&mut editor).unwrap();
        let before = editor.graph().nodes.len();

        // Second call: nothing selected, graph untouched, no error
        selection.delete_selected(&mut editor).unwrap();
        assert_eq!(editor.graph().nodes.len(), before);
    }

    #[test]
    fn test_duplicate_selects_the_copy() {
        let (mut editor, id) = editor_with_node();
        let mut selection = Selection::new();
        selection.select(Some(id.clone()));

        let copy_id = selection.duplicate_selected(&mut editor).unwrap().unwrap();
        assert_ne!(copy_id, id);
        assert!(selection.is_selected(&copy_id));
        assert_eq!(editor.graph().nodes.len(), 2);
    }

    #[test]
    fn test_duplicate_with_no_selection() {
        let (mut editor, _) = editor_with_node();
        let mut selection = Selection::new();
        assert!(selection.duplicate_selected(&mut editor).unwrap().is_none());
        assert_eq!(editor.graph().nodes.len(), 1);
    }
}
