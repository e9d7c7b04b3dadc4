// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::types::{HookStage, VertexId};

#[derive(Error, Debug)]
pub enum DelayDagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown vertex: {0}")]
    UnknownVertex(VertexId),

    #[error("{stage} action failed at vertex '{vertex}': {source}")]
    HookFailure {
        vertex: VertexId,
        stage: HookStage,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("branch spawned by vertex '{parent}' panicked: {message}")]
    BranchPanicked { parent: VertexId, message: String },

    #[error("traversal cancelled before vertex '{0}' was visited")]
    Cancelled(VertexId),

    #[error("Cycle detected in DAG: {0}")]
    DagCycle(String),

    #[error("{} traversal branches failed: {}", .0.len(), summarize(.0))]
    Aggregate(Vec<DelayDagError>),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DelayDagError {
    /// Collapse a list of branch failures into one error.
    ///
    /// Returns `None` for an empty list, the failure itself for a single one,
    /// and [`DelayDagError::Aggregate`] otherwise.
    pub fn from_failures(mut failures: Vec<DelayDagError>) -> Option<Self> {
        match failures.len() {
            0 => None,
            1 => failures.pop(),
            _ => Some(DelayDagError::Aggregate(failures)),
        }
    }

    /// Individual failures, flattening aggregates.
    pub fn failures(&self) -> Vec<&DelayDagError> {
        match self {
            DelayDagError::Aggregate(inner) => inner.iter().flat_map(|e| e.failures()).collect(),
            other => vec![other],
        }
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(self, DelayDagError::Cancelled(_))
    }
}

fn summarize(failures: &[DelayDagError]) -> String {
    failures
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, DelayDagError>;
