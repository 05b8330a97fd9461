//! Canvas viewport and pointer-gesture protocol
//!
//! The viewport is a pure transform between screen space and canvas
//! space; it carries no graph state. Pointer interactions arrive as
//! [`Gesture`] values and are translated into graph mutations by the
//! [`CanvasController`], keeping the data model independent of any
//! rendering technology.

use serde::{Deserialize, Serialize};

use crate::editor::GraphEditor;
use crate::error::Result;
use crate::selection::Selection;
use crate::types::{EdgeId, NodeId, NodeKind, Position};

/// Zoom bounds for the canvas
pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 2.5;

/// Pan/zoom transform from canvas space to screen space
///
/// screen = canvas * zoom + pan. The inverse is applied to pointer
/// coordinates at drop time so nodes land under the cursor regardless
/// of the current pan and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Convert a screen-space point to canvas space
    pub fn to_canvas(&self, screen: Position) -> Position {
        Position {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a canvas-space point to screen space
    pub fn to_screen(&self, canvas: Position) -> Position {
        Position {
            x: canvas.x * self.zoom + self.pan_x,
            y: canvas.y * self.zoom + self.pan_y,
        }
    }

    /// Shift the pan by a screen-space delta
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Zoom around a screen-space focus point, keeping the canvas point
    /// under the cursor fixed
    pub fn zoom_by(&mut self, factor: f64, focus: Position) {
        let anchor = self.to_canvas(focus);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let moved = self.to_screen(anchor);
        self.pan_x += focus.x - moved.x;
        self.pan_y += focus.y - moved.y;
    }
}

/// Display category for node and minimap rendering
///
/// Presentation-only mapping from node kind to one of four fixed color
/// channels; node boxes and the overview must use the same mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayCategory {
    Trigger,
    Action,
    Logic,
    Other,
}

/// Map a node kind to its display category
pub fn display_category(kind: NodeKind) -> DisplayCategory {
    match kind {
        NodeKind::Trigger => DisplayCategory::Trigger,
        NodeKind::Action => DisplayCategory::Action,
        NodeKind::Logic => DisplayCategory::Logic,
    }
}

/// An abstract pointer interaction on the canvas
///
/// Screen-space coordinates; the controller converts to canvas space
/// where a graph position is needed.
#[derive(Debug, Clone)]
pub enum Gesture {
    /// An archetype was dragged from the palette and released
    PaletteDrop { archetype: String, screen: Position },
    /// A node body is being dragged (fires continuously)
    DragNode { node: NodeId, screen: Position },
    /// A connection was drawn from one node's anchor to another's
    DrawConnection { source: NodeId, target: NodeId },
    /// A node was clicked
    Click { node: NodeId },
    /// A node was double-clicked
    DoubleClick { node: NodeId },
    /// The canvas background was clicked
    BackgroundClick,
    /// The canvas was panned by a screen-space delta
    Pan { dx: f64, dy: f64 },
    /// The canvas was zoomed around a focus point
    Zoom { factor: f64, focus: Position },
}

/// What a gesture asked the surrounding UI to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing beyond the applied mutation
    Handled,
    /// A node was created at the drop point
    NodeAdded(NodeId),
    /// An edge was created
    EdgeAdded(EdgeId),
    /// The configuration dialog should open for this node
    OpenDialog(NodeId),
}

/// Translates gestures into editor mutations and selection changes
#[derive(Debug, Default)]
pub struct CanvasController {
    pub viewport: Viewport,
}

impl CanvasController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one gesture against the editor and selection
    ///
    /// Mutations run synchronously; a rejected mutation surfaces the
    /// editor's error and leaves the graph unchanged.
    pub fn apply(
        &mut self,
        gesture: Gesture,
        editor: &mut GraphEditor,
        selection: &mut Selection,
    ) -> Result<GestureOutcome> {
        match gesture {
            Gesture::PaletteDrop { archetype, screen } => {
                let position = self.viewport.to_canvas(screen);
                let id = editor.add_node(&archetype, position)?.id.clone();
                Ok(GestureOutcome::NodeAdded(id))
            }
            Gesture::DragNode { node, screen } => {
                let position = self.viewport.to_canvas(screen);
                editor.move_node(&node, position)?;
                Ok(GestureOutcome::Handled)
            }
            Gesture::DrawConnection { source, target } => {
                let id = editor.connect(&source, &target)?.id.clone();
                Ok(GestureOutcome::EdgeAdded(id))
            }
            Gesture::Click { node } => {
                selection.select(Some(node));
                Ok(GestureOutcome::Handled)
            }
            Gesture::DoubleClick { node } => {
                selection.select(Some(node.clone()));
                Ok(GestureOutcome::OpenDialog(node))
            }
            Gesture::BackgroundClick => {
                selection.clear();
                Ok(GestureOutcome::Handled)
            }
            Gesture::Pan { dx, dy } => {
                self.viewport.pan_by(dx, dy);
                Ok(GestureOutcome::Handled)
            }
            Gesture::Zoom { factor, focus } => {
                self.viewport.zoom_by(factor, focus);
                Ok(GestureOutcome::Handled)
            }
        }
    }
}
