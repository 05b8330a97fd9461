//! Top-level view-state machine and the studio session
//!
//! The editor surface is one of three views: the template gallery, a
//! single-template preview, and the graph builder. [`StudioSession`]
//! ties the view machine to the template catalog, the graph editor, the
//! selection, the canvas, and the config dialog, so one object drives
//! the whole builder experience.

use std::sync::Arc;

use crate::canvas::{CanvasController, Gesture, GestureOutcome};
use crate::catalog::ArchetypeCatalog;
use crate::dialog::ConfigDialog;
use crate::editor::GraphEditor;
use crate::error::Result;
use crate::selection::Selection;
use crate::templates::TemplateCatalog;

/// Which top-level view is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudioView {
    /// Template gallery (initial view)
    Gallery,
    /// Single-template preview
    Preview,
    /// The graph builder canvas
    Builder,
}

/// One builder session: view state, template choice, and live editor
pub struct StudioSession {
    archetypes: Arc<ArchetypeCatalog>,
    templates: TemplateCatalog,
    view: StudioView,
    selected_template: Option<String>,
    editor: Option<GraphEditor>,
    pub selection: Selection,
    pub canvas: CanvasController,
    pub dialog: ConfigDialog,
}

impl StudioSession {
    /// Start a session in the gallery with the built-in catalogs
    pub fn new() -> Self {
        Self::with_catalogs(Arc::new(ArchetypeCatalog::built_in()), TemplateCatalog::built_in())
    }

    pub fn with_catalogs(archetypes: Arc<ArchetypeCatalog>, templates: TemplateCatalog) -> Self {
        Self {
            archetypes,
            templates,
            view: StudioView::Gallery,
            selected_template: None,
            editor: None,
            selection: Selection::new(),
            canvas: CanvasController::new(),
            dialog: ConfigDialog::new(),
        }
    }

    pub fn view(&self) -> StudioView {
        self.view
    }

    /// The template being previewed, valid only in the preview view
    pub fn selected_template(&self) -> Option<&str> {
        self.selected_template.as_deref()
    }

    pub fn templates(&self) -> &TemplateCatalog {
        &self.templates
    }

    /// The live editor, present only in the builder view
    pub fn editor(&self) -> Option<&GraphEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut GraphEditor> {
        self.editor.as_mut()
    }

    /// gallery -> preview, carrying the chosen template
    ///
    /// An unknown template id is an invalid transition and falls back
    /// to the gallery.
    pub fn select_template(&mut self, template_id: &str) {
        if self.templates.get(template_id).is_some() {
            self.selected_template = Some(template_id.to_string());
            self.view = StudioView::Preview;
        } else {
            log::warn!("select_template: unknown template '{}'", template_id);
            self.selected_template = None;
            self.view = StudioView::Gallery;
        }
    }

    /// preview -> builder, seeding the graph from the chosen template
    ///
    /// Without a template (invalid transition) the session falls back
    /// to the gallery silently.
    pub fn use_template(&mut self) -> Result<()> {
        let Some(template_id) = self.selected_template.clone() else {
            log::warn!("use_template with no template selected");
            self.view = StudioView::Gallery;
            return Ok(());
        };
        let Some(template) = self.templates.get(&template_id) else {
            self.selected_template = None;
            self.view = StudioView::Gallery;
            return Ok(());
        };

        let graph = template.instantiate()?;
        self.enter_builder(GraphEditor::from_graph(graph, self.archetypes.clone()));
        Ok(())
    }

    /// gallery/preview -> builder with an empty graph
    pub fn create_custom(&mut self, name: impl Into<String>) {
        self.enter_builder(GraphEditor::new(name, self.archetypes.clone()));
    }

    /// Back navigation: preview -> gallery, builder -> gallery
    pub fn back(&mut self) {
        match self.view {
            StudioView::Preview => {
                self.selected_template = None;
                self.view = StudioView::Gallery;
            }
            StudioView::Builder => {
                self.editor = None;
                self.selection.clear();
                self.dialog.cancel();
                self.view = StudioView::Gallery;
            }
            StudioView::Gallery => {}
        }
    }

    fn enter_builder(&mut self, editor: GraphEditor) {
        self.editor = Some(editor);
        self.selection.clear();
        self.dialog.cancel();
        self.canvas = CanvasController::new();
        self.selected_template = None;
        self.view = StudioView::Builder;
    }

    /// Feed a canvas gesture through the controller; opens the config
    /// dialog when the gesture asks for it
    ///
    /// Ignored outside the builder view.
    pub fn handle_gesture(&mut self, gesture: Gesture) -> Result<GestureOutcome> {
        let Some(editor) = self.editor.as_mut() else {
            return Ok(GestureOutcome::Handled);
        };
        let outcome = self.canvas.apply(gesture, editor, &mut self.selection)?;
        if let GestureOutcome::OpenDialog(node_id) = &outcome {
            self.dialog.open(editor, node_id)?;
        }
        Ok(outcome)
    }

    /// Commit the config dialog's draft to the graph
    pub fn confirm_dialog(&mut self) -> Result<()> {
        if let Some(editor) = self.editor.as_mut() {
            self.dialog.confirm(editor)?;
        }
        Ok(())
    }

    /// Delete the selected node (side-panel action)
    pub fn delete_selected(&mut self) -> Result<()> {
        if let Some(editor) = self.editor.as_mut() {
            self.selection.delete_selected(editor)?;
        }
        Ok(())
    }

    /// Duplicate the selected node and select the copy (side-panel action)
    pub fn duplicate_selected(&mut self) -> Result<Option<crate::types::NodeId>> {
        match self.editor.as_mut() {
            Some(editor) => self.selection.duplicate_selected(editor),
            None => Ok(None),
        }
    }
}

impl Default for StudioSession {
    fn default() -> Self {
        Self::new()
    }
}
