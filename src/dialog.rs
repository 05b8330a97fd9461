//! Node configuration dialog
//!
//! A modal form over a single node's label, kind, and description. Edits
//! accumulate in a local draft; the graph is touched only on confirm.
//! Opening, editing, and cancelling any number of times leaves the graph
//! exactly as it was.

use crate::editor::GraphEditor;
use crate::error::{Result, StudioError};
use crate::types::{NodeId, NodeKind};

/// Draft form state for one node
#[derive(Debug, Clone)]
struct Draft {
    label: String,
    kind: NodeKind,
    description: String,
}

/// Modal editor bound to at most one node at a time
#[derive(Debug, Default)]
pub struct ConfigDialog {
    target: Option<(NodeId, Draft)>,
}

impl ConfigDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the dialog is currently open
    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    /// The node the dialog is editing, if open
    pub fn node_id(&self) -> Option<&str> {
        self.target.as_ref().map(|(id, _)| id.as_str())
    }

    /// Open the dialog for a node, seeding the draft from current values
    ///
    /// Reopening for another node discards any in-progress draft.
    pub fn open(&mut self, editor: &GraphEditor, node_id: &str) -> Result<()> {
        let node = editor
            .graph()
            .find_node(node_id)
            .ok_or_else(|| StudioError::NodeNotFound(node_id.to_string()))?;
        self.target = Some((
            node.id.clone(),
            Draft {
                label: node.label.clone(),
                kind: node.kind,
                description: node.description.clone(),
            },
        ));
        Ok(())
    }

    /// Edit the draft label (no graph effect)
    pub fn set_label(&mut self, label: impl Into<String>) {
        if let Some((_, draft)) = &mut self.target {
            draft.label = label.into();
        }
    }

    /// Edit the draft kind (no graph effect)
    pub fn set_kind(&mut self, kind: NodeKind) {
        if let Some((_, draft)) = &mut self.target {
            draft.kind = kind;
        }
    }

    /// Edit the draft description (no graph effect)
    pub fn set_description(&mut self, description: impl Into<String>) {
        if let Some((_, draft)) = &mut self.target {
            draft.description = description.into();
        }
    }

    /// Current draft values, for form rendering
    pub fn draft(&self) -> Option<(&str, NodeKind, &str)> {
        self.target
            .as_ref()
            .map(|(_, d)| (d.label.as_str(), d.kind, d.description.as_str()))
    }

    /// Commit the draft to the graph and close the dialog
    ///
    /// Writes the display fields and marks the node configured. Fails
    /// (and closes) if the node was deleted while the dialog was open.
    pub fn confirm(&mut self, editor: &mut GraphEditor) -> Result<()> {
        let Some((node_id, draft)) = self.target.take() else {
            return Ok(());
        };
        editor.update_node_details(&node_id, draft.label, draft.kind, draft.description)?;
        editor.update_node_config(&node_id, serde_json::Map::new())?;
        Ok(())
    }

    /// Discard the draft and close the dialog; the graph is untouched
    pub fn cancel(&mut self) {
        self.target = None;
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
            .add_node("send-email", Position::new(0.0, 0.0))
            .unwrap()
            .id
            .clone();
        (editor, id)
    }

    #[test]
    fn test_confirm_commits_draft() {
        let (mut editor, id) = editor_with_node();
        let mut dialog = ConfigDialog::new();

        dialog.open(&editor, &id).unwrap();
        dialog.set_label("Notify customer");
        dialog.set_kind(NodeKind::Action);
        dialog.set_description("Sends the resolution email");
        dialog.confirm(&mut editor).unwrap();

        let node = editor.graph().find_node(&id).unwrap();
        assert_eq!(node.label, "Notify customer");
        assert_eq!(node.description, "Sends the resolution email");
        assert!(node.is_configured);
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_cancel_discards_edits() {
        let (mut editor, id) = editor_with_node();
        let before = editor.graph().find_node(&id).unwrap().clone();
        let mut dialog = ConfigDialog::new();

        // Repeated open/edit/cancel cycles never change the graph
        for _ in 0..3 {
            dialog.open(&editor, &id).unwrap();
            dialog.set_label("scratch");
            dialog.set_description("scratch");
            dialog.cancel();
        }

        let after = editor.graph().find_node(&id).unwrap();
        assert_eq!(after.label, before.label);
        assert_eq!(after.description, before.description);
        assert_eq!(after.is_configured, before.is_configured);
    }

    #[test]
    fn test_keystrokes_do_not_touch_graph() {
        let (editor, id) = editor_with_node();
        let mut dialog = ConfigDialog::new();
        dialog.open(&editor, &id).unwrap();
        dialog.set_label("typing...");

        // Draft holds the edit; the graph still has the original label
        assert_eq!(dialog.draft().unwrap().0, "typing...");
        assert_eq!(editor.graph().find_node(&id).unwrap().label, "Send Email");
    }

    #[test]
    fn test_open_unknown_node() {
        let (editor, _) = editor_with_node();
        let mut dialog = ConfigDialog::new();
        let err = dialog.open(&editor, "ghost").unwrap_err();
        assert!(matches!(err, StudioError::NodeNotFound(_)));
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_confirm_after_node_deleted() {
        let (mut editor, id) = editor_with_node();
        let mut dialog = ConfigDialog::new();
        dialog.open(&editor, &id).unwrap();

        editor.delete_node(&id).unwrap();
        let err = dialog.confirm(&mut editor).unwrap_err();
        assert!(matches!(err, StudioError::NodeNotFound(_)));
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_confirm_when_closed_is_noop() {
        let (mut editor, _) = editor_with_node();
        let mut dialog = ConfigDialog::new();
        dialog.confirm(&mut editor).unwrap();
    }
}
