//! Template catalog and graph seeding
//!
//! Templates are immutable, pre-built workflows with metadata for the
//! gallery. Adopting one seeds a fresh [`WorkflowGraph`]; the template
//! itself is never mutated. Templates carry no canvas coordinates, so
//! instantiation performs an initial vertical layout pass.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StudioError};
use crate::types::{NodeKind, Position, WorkflowEdge, WorkflowGraph, WorkflowNode};

/// Horizontal column for the initial vertical layout
const LAYOUT_X: f64 = 260.0;
/// Vertical spacing between laid-out steps
const LAYOUT_SPACING: f64 = 140.0;
/// Top margin of the first laid-out step
const LAYOUT_TOP: f64 = 80.0;

/// Template complexity rating shown in the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Simple,
    Medium,
    Advanced,
}

/// The role of a step within a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Start,
    Process,
    Decision,
    End,
}

impl StepKind {
    /// The node kind a step of this role instantiates as
    pub fn node_kind(&self) -> NodeKind {
        match self {
            StepKind::Start => NodeKind::Trigger,
            StepKind::Process | StepKind::End => NodeKind::Action,
            StepKind::Decision => NodeKind::Logic,
        }
    }
}

/// One step of a template, with the ids of the steps it connects to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStep {
    pub id: String,
    pub kind: StepKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Ids of downstream steps within the same template
    #[serde(default)]
    pub connections: Vec<String>,
}

/// A named, pre-built workflow with gallery metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub estimated_time: String,
    pub complexity: Complexity,
    pub steps: Vec<TemplateStep>,
}

impl WorkflowTemplate {
    /// Validate that every declared connection targets a step in this
    /// template
    pub fn validate(&self) -> Result<()> {
        for step in &self.steps {
            for target in &step.connections {
                if !self.steps.iter().any(|s| &s.id == target) {
                    return Err(StudioError::DanglingTemplateReference {
                        template: self.id.clone(),
                        step: step.id.clone(),
                        missing: target.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Seed a workflow graph from this template
    ///
    /// Each step becomes one node (kind from the step role, label from
    /// the title) and each declared connection one edge. Steps are laid
    /// out as a vertical list. Fails eagerly on a dangling connection
    /// rather than surfacing a broken graph later.
    pub fn instantiate(&self) -> Result<WorkflowGraph> {
        self.validate()?;

        let mut graph = WorkflowGraph::new(&self.name);
        graph.description = self.description.clone();

        // Template step id -> generated node id
        let node_ids: Vec<(String, String)> = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| (step.id.clone(), format!("node-{}", i + 1)))
            .collect();
        let node_id_for = |step_id: &str| -> String {
            node_ids
                .iter()
                .find(|(sid, _)| sid == step_id)
                .map(|(_, nid)| nid.clone())
                .expect("validated above")
        };

        for (i, step) in self.steps.iter().enumerate() {
            graph.nodes.push(WorkflowNode {
                id: node_id_for(&step.id),
                archetype: step.category.clone(),
                position: Position::new(LAYOUT_X, LAYOUT_TOP + i as f64 * LAYOUT_SPACING),
                label: step.title.clone(),
                description: step.description.clone(),
                kind: step.kind.node_kind(),
                config: serde_json::Map::new(),
                is_configured: false,
            });
        }

        let mut edge_counter = 0;
        for step in &self.steps {
            for target in &step.connections {
                edge_counter += 1;
                graph.edges.push(WorkflowEdge {
                    id: format!("edge-{}", edge_counter),
                    source: node_id_for(&step.id),
                    target: node_id_for(target),
                });
            }
        }

        debug_assert!(graph.dangling_edges().is_empty());
        Ok(graph)
    }
}

/// Static, read-only library of templates for the gallery
pub struct TemplateCatalog {
    templates: Vec<WorkflowTemplate>,
}

impl TemplateCatalog {
    /// The built-in template library
    pub fn built_in() -> Self {
        Self {
            templates: built_in_templates(),
        }
    }

    /// All templates in gallery order
    pub fn all(&self) -> &[WorkflowTemplate] {
        &self.templates
    }

    /// Look up a template by id
    pub fn get(&self, id: &str) -> Option<&WorkflowTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Templates within a gallery category
    pub fn by_category(&self, category: &str) -> Vec<&WorkflowTemplate> {
        self.templates
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Templates at a given complexity
    pub fn by_complexity(&self, complexity: Complexity) -> Vec<&WorkflowTemplate> {
        self.templates
            .iter()
            .filter(|t| t.complexity == complexity)
            .collect()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::built_in()
    }
}

fn step(
    id: &str,
    kind: StepKind,
    title: &str,
    description: &str,
    category: &str,
    connections: &[&str],
) -> TemplateStep {
    TemplateStep {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        connections: connections.iter().map(|s| s.to_string()).collect(),
    }
}

fn built_in_templates() -> Vec<WorkflowTemplate> {
    vec![
        WorkflowTemplate {
            id: "customer-support-automation".to_string(),
            name: "Customer Support Automation".to_string(),
            description: "Classify incoming tickets, draft AI replies, and escalate when needed"
                .to_string(),
            category: "Support".to_string(),
            estimated_time: "10 min".to_string(),
            complexity: Complexity::Medium,
            steps: vec![
                step(
                    "start",
                    StepKind::Start,
                    "Ticket Received",
                    "Fires when a new support ticket arrives",
                    "trigger",
                    &["process-1"],
                ),
                step(
                    "process-1",
                    StepKind::Process,
                    "Classify Ticket",
                    "Runs the classifier model over the ticket body",
                    "ai",
                    &["decision-1"],
                ),
                step(
                    "decision-1",
                    StepKind::Decision,
                    "Needs Human?",
                    "Routes on the classifier's confidence score",
                    "logic",
                    &["process-2", "end"],
                ),
                step(
                    "process-2",
                    StepKind::Process,
                    "Draft AI Reply",
                    "Generates a suggested response for review",
                    "ai",
                    &["end"],
                ),
                step(
                    "end",
                    StepKind::End,
                    "Close Ticket",
                    "Marks the ticket resolved",
                    "action",
                    &[],
                ),
            ],
        },
        WorkflowTemplate {
            id: "lead-qualification".to_string(),
            name: "Lead Qualification".to_string(),
            description: "Score new leads and hand the hot ones to sales".to_string(),
            category: "Sales".to_string(),
            estimated_time: "5 min".to_string(),
            complexity: Complexity::Simple,
            steps: vec![
                step(
                    "start",
                    StepKind::Start,
                    "New Lead",
                    "Fires when a form submission creates a lead",
                    "trigger",
                    &["score"],
                ),
                step(
                    "score",
                    StepKind::Process,
                    "Score Lead",
                    "Scores the lead against the ideal customer profile",
                    "ai",
                    &["end"],
                ),
                step(
                    "end",
                    StepKind::End,
                    "Notify Sales",
                    "Posts qualified leads to the sales channel",
                    "action",
                    &[],
                ),
            ],
        },
        WorkflowTemplate {
            id: "content-pipeline".to_string(),
            name: "Content Generation Pipeline".to_string(),
            description: "Draft, review, and schedule content across channels".to_string(),
            category: "Marketing".to_string(),
            estimated_time: "20 min".to_string(),
            complexity: Complexity::Advanced,
            steps: vec![
                step(
                    "start",
                    StepKind::Start,
                    "Weekly Schedule",
                    "Kicks off every Monday morning",
                    "trigger",
                    &["brief"],
                ),
                step(
                    "brief",
                    StepKind::Process,
                    "Generate Brief",
                    "Builds a content brief from the topic backlog",
                    "ai",
                    &["draft"],
                ),
                step(
                    "draft",
                    StepKind::Process,
                    "Draft Article",
                    "Writes a first draft from the brief",
                    "ai",
                    &["review"],
                ),
                step(
                    "review",
                    StepKind::Decision,
                    "Quality Gate",
                    "Checks the draft against the style guide",
                    "logic",
                    &["draft", "publish"],
                ),
                step(
                    "publish",
                    StepKind::End,
                    "Schedule Post",
                    "Queues the approved draft for publishing",
                    "action",
                    &[],
                ),
            ],
        },
        WorkflowTemplate {
            id: "invoice-processing".to_string(),
            name: "Invoice Processing".to_string(),
            description: "Extract invoice fields and sync them to accounting".to_string(),
            category: "Finance".to_string(),
            estimated_time: "8 min".to_string(),
            complexity: Complexity::Medium,
            steps: vec![
                step(
                    "start",
                    StepKind::Start,
                    "Invoice Email",
                    "Fires when an invoice attachment arrives",
                    "trigger",
                    &["extract"],
                ),
                step(
                    "extract",
                    StepKind::Process,
                    "Extract Fields",
                    "Pulls totals, dates, and vendor from the PDF",
                    "ai",
                    &["check"],
                ),
                step(
                    "check",
                    StepKind::Decision,
                    "Amount Threshold",
                    "Flags invoices above the approval limit",
                    "logic",
                    &["end"],
                ),
                step(
                    "end",
                    StepKind::End,
                    "Sync to Ledger",
                    "Writes the record into accounting",
                    "action",
                    &[],
                ),
            ],
        },
    ]
}
