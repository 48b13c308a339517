//! Error types for crowd-sim.

use thiserror::Error;

use crowd_core::{AgentId, ComponentId};
use crowd_mesh::MeshError;
use crowd_nav::NavError;

/// Errors surfaced by the simulator and its builder.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulator configuration error: {0}")]
    Config(String),

    #[error("component {0} is not registered")]
    UnknownComponent(ComponentId),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Nav(#[from] NavError),
}

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;
