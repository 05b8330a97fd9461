//! Workflow Studio - graph editor core for the visual workflow builder
//!
//! This crate implements the data model and interaction logic behind the
//! workflow canvas:
//!
//! - An archetype catalog backing the drag-from palette
//! - A mutable workflow graph whose mutations preserve referential
//!   integrity (deleting a node atomically drops its edges)
//! - A pure pan/zoom viewport and an abstract pointer-gesture protocol,
//!   keeping the model independent of any rendering technology
//! - Single-node selection, a commit-on-confirm configuration dialog,
//!   and the gallery/preview/builder view-state machine
//! - A template catalog that seeds graphs, validated eagerly against
//!   dangling step references
//! - An async persistence boundary (HTTP and in-memory implementations)
//!
//! # Example
//!
//! ```ignore
//! use workflow_studio::{Gesture, Position, StudioSession};
//!
//! let mut session = StudioSession::new();
//! session.select_template("customer-support-automation");
//! session.use_template()?;
//! session.handle_gesture(Gesture::PaletteDrop {
//!     archetype: "ai-completion".into(),
//!     screen: Position::new(400.0, 240.0),
//! })?;
//! ```

pub mod builder;
pub mod canvas;
pub mod catalog;
pub mod dialog;
pub mod editor;
pub mod error;
pub mod persistence;
pub mod selection;
pub mod templates;
pub mod types;
pub mod view;

// Re-export key types
pub use builder::GraphBuilder;
pub use canvas::{
    display_category, CanvasController, DisplayCategory, Gesture, GestureOutcome, Viewport,
};
pub use catalog::{ArchetypeCatalog, NodeArchetype};
pub use dialog::ConfigDialog;
pub use editor::GraphEditor;
pub use error::{Result, StudioError};
pub use persistence::{
    DeleteAck, HttpWorkflowApi, InMemoryWorkflowApi, NewWorkflow, TestRunReport, WorkflowApi,
    WorkflowPatch, WorkflowRecord,
};
pub use selection::Selection;
pub use templates::{Complexity, StepKind, TemplateCatalog, TemplateStep, WorkflowTemplate};
pub use types::{
    EdgeId, NodeId, NodeKind, Position, WorkflowEdge, WorkflowGraph, WorkflowNode,
};
pub use view::{StudioSession, StudioView};
