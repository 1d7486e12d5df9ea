//! Error types for markovgen

use thiserror::Error;

/// Errors that can occur during model transformation
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("vertex {vertex} has outgoing transitions but a zero occurrence count sum")]
    ZeroTransitionCount { vertex: usize },

    #[error("unknown matrix state: {0}")]
    UnknownState(String),

    #[error("vertex {vertex} has a transition to non-existent vertex index {target}")]
    InvalidTarget { vertex: usize, target: usize },

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
