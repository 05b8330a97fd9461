//! Archetype catalog for the node palette
//!
//! The catalog is the static registry of draggable node kinds. Each
//! archetype carries a default configuration payload that is cloned,
//! never shared, into new node instances.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::types::NodeKind;

/// An immutable node archetype
///
/// Built once at startup from the built-in set; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeArchetype {
    /// Unique key (e.g. "webhook")
    pub id: String,
    /// Node kind, also the palette section it appears under
    pub kind: NodeKind,
    /// Human-readable label
    pub label: String,
    /// Description shown in the palette tooltip
    pub description: String,
    /// Default configuration, cloned into each new instance
    pub default_config: serde_json::Map<String, serde_json::Value>,
}

impl NodeArchetype {
    fn new(
        id: &str,
        kind: NodeKind,
        label: &str,
        description: &str,
        default_config: serde_json::Value,
    ) -> Self {
        let default_config = match default_config {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Self {
            id: id.to_string(),
            kind,
            label: label.to_string(),
            description: description.to_string(),
            default_config,
        }
    }
}

/// Registry of node archetypes, keyed by id
pub struct ArchetypeCatalog {
    entries: HashMap<String, NodeArchetype>,
}

impl ArchetypeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The built-in archetype set shipped with the studio
    pub fn built_in() -> Self {
        let mut catalog = Self::new();
        for archetype in built_in_archetypes() {
            catalog.register(archetype);
        }
        catalog
    }

    /// Register an archetype, replacing any existing entry with the same id
    pub fn register(&mut self, archetype: NodeArchetype) {
        self.entries.insert(archetype.id.clone(), archetype);
    }

    /// Look up an archetype by id
    pub fn get(&self, id: &str) -> Option<&NodeArchetype> {
        self.entries.get(id)
    }

    /// Check if an archetype id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// All archetypes, unordered
    pub fn all(&self) -> Vec<&NodeArchetype> {
        self.entries.values().collect()
    }

    /// Archetypes grouped by kind for palette rendering
    pub fn by_kind(&self) -> HashMap<NodeKind, Vec<&NodeArchetype>> {
        let mut grouped: HashMap<NodeKind, Vec<&NodeArchetype>> = HashMap::new();
        for archetype in self.entries.values() {
            grouped.entry(archetype.kind).or_default().push(archetype);
        }
        for group in grouped.values_mut() {
            group.sort_by(|a, b| a.label.cmp(&b.label));
        }
        grouped
    }

    /// Number of registered archetypes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ArchetypeCatalog {
    fn default() -> Self {
        Self::built_in()
    }
}

fn built_in_archetypes() -> Vec<NodeArchetype> {
    vec![
        NodeArchetype::new(
            "webhook",
            NodeKind::Trigger,
            "Webhook",
            "Starts the workflow when an HTTP request arrives",
            json!({"method": "POST", "path": "/hooks/incoming"}),
        ),
        NodeArchetype::new(
            "schedule",
            NodeKind::Trigger,
            "Schedule",
            "Starts the workflow on a cron schedule",
            json!({"cron": "0 9 * * *", "timezone": "UTC"}),
        ),
        NodeArchetype::new(
            "email-received",
            NodeKind::Trigger,
            "Email Received",
            "Starts the workflow when a new email arrives",
            json!({"mailbox": "inbox", "filter": ""}),
        ),
        NodeArchetype::new(
            "ai-completion",
            NodeKind::Action,
            "AI Completion",
            "Runs a prompt against the configured model provider",
            json!({"provider": "default", "model": "gpt-4o", "temperature": 0.7, "prompt": ""}),
        ),
        NodeArchetype::new(
            "send-email",
            NodeKind::Action,
            "Send Email",
            "Sends an email through the connected provider",
            json!({"to": "", "subject": "", "body": ""}),
        ),
        NodeArchetype::new(
            "http-request",
            NodeKind::Action,
            "HTTP Request",
            "Calls an external API endpoint",
            json!({"method": "GET", "url": "", "headers": {}}),
        ),
        NodeArchetype::new(
            "update-record",
            NodeKind::Action,
            "Update Record",
            "Writes fields back to a connected data source",
            json!({"source": "", "record_id": "", "fields": {}}),
        ),
        NodeArchetype::new(
            "condition",
            NodeKind::Logic,
            "Condition",
            "Branches the workflow on a boolean expression",
            json!({"expression": "", "default_branch": "false"}),
        ),
        NodeArchetype::new(
            "delay",
            NodeKind::Logic,
            "Delay",
            "Pauses the workflow for a fixed duration",
            json!({"duration_seconds": 60}),
        ),
        NodeArchetype::new(
            "router",
            NodeKind::Logic,
            "Router",
            "Routes execution to one of several branches by key",
            json!({"key": "", "routes": {}}),
        ),
    ]
}
