//! Error types for crowd-nav.

use thiserror::Error;

use crowd_core::AgentId;
use crowd_mesh::MeshError;

/// Errors produced by the navigation system.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("agent {0} is not registered")]
    AgentNotFound(AgentId),

    #[error("agent {0} is already registered")]
    DuplicateAgent(AgentId),

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Alias for `Result<T, NavError>`.
pub type NavResult<T> = Result<T, NavError>;
