//! Error types for the workflow studio

use thiserror::Error;

/// Result type alias using StudioError
pub type Result<T> = std::result::Result<T, StudioError>;

/// Errors that can occur in the workflow studio core
#[derive(Debug, Error)]
pub enum StudioError {
    /// An archetype id is not present in the catalog
    #[error("Unknown archetype: {0}")]
    UnknownArchetype(String),

    /// A node id does not exist in the current graph
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// A template step connects to a step id that is not in the template
    #[error("Template '{template}': step '{step}' connects to missing step '{missing}'")]
    DanglingTemplateReference {
        template: String,
        step: String,
        missing: String,
    },

    /// The workflow API rejected or failed a request
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StudioError {
    /// Create a persistence error with a message
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}

impl From<reqwest::Error> for StudioError {
    fn from(err: reqwest::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}
