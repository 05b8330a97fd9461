//! Workflow persistence boundary
//!
//! The editor's only external collaborator. The wire representation
//! mirrors the REST API's snake_case payloads; graph node and edge sets
//! are carried verbatim so a save/load cycle is lossless. Saving is
//! fire-and-forget from the editor's point of view: the in-memory graph
//! stays authoritative whether or not a save succeeds.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, StudioError};
use crate::templates::TemplateCatalog;
use crate::types::{WorkflowEdge, WorkflowGraph, WorkflowNode};

/// A persisted workflow, as sent and received over the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub execution_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkflowRecord {
    /// Rebuild an editable graph from this record
    pub fn into_graph(self) -> WorkflowGraph {
        WorkflowGraph {
            name: self.name,
            description: self.description.unwrap_or_default(),
            is_active: self.is_active,
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

/// Payload for creating a workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkflow {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl NewWorkflow {
    /// Build a create payload from the current graph
    pub fn from_graph(graph: &WorkflowGraph, user_id: Option<String>) -> Self {
        Self {
            name: graph.name.clone(),
            description: (!graph.description.is_empty()).then(|| graph.description.clone()),
            is_active: graph.is_active,
            nodes: graph.nodes.clone(),
            edges: graph.edges.clone(),
            metadata: None,
            user_id,
        }
    }
}

/// Partial update to an existing workflow
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<WorkflowNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<WorkflowEdge>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Acknowledgement returned by a delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAck {
    pub message: String,
}

/// Response of the "test workflow" action
///
/// The test endpoint is a stub that reports synthetic success; treat
/// this as "fire a request, show its response", not real execution
/// feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRunReport {
    pub execution_id: String,
    pub status: String,
    pub executed_at: DateTime<Utc>,
    pub nodes_executed: usize,
}

/// The persistence collaborator consumed by the editor
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    async fn create_workflow(&self, payload: NewWorkflow) -> Result<WorkflowRecord>;
    async fn create_from_template(
        &self,
        template_id: &str,
        payload: NewWorkflow,
    ) -> Result<WorkflowRecord>;
    async fn get_workflow(&self, id: &str) -> Result<WorkflowRecord>;
    async fn update_workflow(&self, id: &str, patch: WorkflowPatch) -> Result<WorkflowRecord>;
    async fn delete_workflow(&self, id: &str) -> Result<DeleteAck>;
    async fn test_workflow(&self, id: &str) -> Result<TestRunReport>;
}

/// HTTP implementation of the workflow API
pub struct HttpWorkflowApi {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpWorkflowApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            bearer_token: None,
        }
    }

    /// Attach a bearer token to every request
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::debug!("workflow API returned {}: {}", status, body);
            return Err(StudioError::persistence(format!(
                "API request failed with status {}: {}",
                status, body
            )));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl WorkflowApi for HttpWorkflowApi {
    async fn create_workflow(&self, payload: NewWorkflow) -> Result<WorkflowRecord> {
        log::debug!("creating workflow '{}'", payload.name);
        let response = self
            .request(reqwest::Method::POST, "workflows")
            .json(&payload)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_from_template(
        &self,
        template_id: &str,
        payload: NewWorkflow,
    ) -> Result<WorkflowRecord> {
        log::debug!("creating workflow from template '{}'", template_id);
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("workflows/from-template/{}", template_id),
            )
            .json(&payload)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get_workflow(&self, id: &str) -> Result<WorkflowRecord> {
        let response = self
            .request(reqwest::Method::GET, &format!("workflows/{}", id))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_workflow(&self, id: &str, patch: WorkflowPatch) -> Result<WorkflowRecord> {
        log::debug!("updating workflow '{}'", id);
        let response = self
            .request(reqwest::Method::PATCH, &format!("workflows/{}", id))
            .json(&patch)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_workflow(&self, id: &str) -> Result<DeleteAck> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("workflows/{}", id))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn test_workflow(&self, id: &str) -> Result<TestRunReport> {
        let response = self
            .request(reqwest::Method::POST, &format!("workflows/{}/test", id))
            .send()
            .await?;
        Self::decode(response).await
    }
}

/// In-memory implementation for tests and offline work
#[derive(Default)]
pub struct InMemoryWorkflowApi {
    records: RwLock<HashMap<String, WorkflowRecord>>,
    templates: TemplateCatalog,
}

impl InMemoryWorkflowApi {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            templates: TemplateCatalog::built_in(),
        }
    }

    /// Number of stored workflows
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl WorkflowApi for InMemoryWorkflowApi {
    async fn create_workflow(&self, payload: NewWorkflow) -> Result<WorkflowRecord> {
        let now = Utc::now();
        let record = WorkflowRecord {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            description: payload.description,
            is_active: payload.is_active,
            nodes: payload.nodes,
            edges: payload.edges,
            metadata: payload.metadata,
            category: None,
            complexity: None,
            estimated_time: None,
            template_id: None,
            user_id: payload.user_id,
            execution_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.records
            .write()
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn create_from_template(
        &self,
        template_id: &str,
        payload: NewWorkflow,
    ) -> Result<WorkflowRecord> {
        let template = self.templates.get(template_id).ok_or_else(|| {
            StudioError::persistence(format!("unknown template '{}'", template_id))
        })?;
        let graph = template.instantiate()?;

        let now = Utc::now();
        let record = WorkflowRecord {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            description: payload.description,
            is_active: payload.is_active,
            nodes: graph.nodes,
            edges: graph.edges,
            metadata: payload.metadata,
            category: Some(template.category.clone()),
            complexity: Some(format!("{:?}", template.complexity)),
            estimated_time: Some(template.estimated_time.clone()),
            template_id: Some(template.id.clone()),
            user_id: payload.user_id,
            execution_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.records
            .write()
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn get_workflow(&self, id: &str) -> Result<WorkflowRecord> {
        self.records
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StudioError::persistence(format!("workflow '{}' not found", id)))
    }

    async fn update_workflow(&self, id: &str, patch: WorkflowPatch) -> Result<WorkflowRecord> {
        let mut records = self.records.write();
        let record = records
            .get_mut(id)
            .ok_or_else(|| StudioError::persistence(format!("workflow '{}' not found", id)))?;

        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(description) = patch.description {
            record.description = Some(description);
        }
        if let Some(is_active) = patch.is_active {
            record.is_active = is_active;
        }
        if let Some(nodes) = patch.nodes {
            record.nodes = nodes;
        }
        if let Some(edges) = patch.edges {
            record.edges = edges;
        }
        if let Some(metadata) = patch.metadata {
            record.metadata = Some(metadata);
        }
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete_workflow(&self, id: &str) -> Result<DeleteAck> {
        self.records
            .write()
            .remove(id)
            .ok_or_else(|| StudioError::persistence(format!("workflow '{}' not found", id)))?;
        Ok(DeleteAck {
            message: format!("Workflow {} deleted", id),
        })
    }

    async fn test_workflow(&self, id: &str) -> Result<TestRunReport> {
        let mut records = self.records.write();
        let record = records
            .get_mut(id)
            .ok_or_else(|| StudioError::persistence(format!("workflow '{}' not found", id)))?;
        record.execution_count += 1;

        // Synthetic success: nothing actually runs
        Ok(TestRunReport {
            execution_id: Uuid::new_v4().to_string(),
            status: "success".to_string(),
            executed_at: Utc::now(),
            nodes_executed: record.nodes.len(),
        })
    }
}
