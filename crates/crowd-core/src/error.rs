//! Engine error base type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CrowdError` via `From` impls or wrap it as one variant.  User errors are
//! reported as values; internal invariant violations are debug assertions,
//! never panics across the public boundary.

use thiserror::Error;

use crate::{AgentId, ComponentId, NodeId};

/// The top-level error type for `crowd-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CrowdError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("component {0} is not registered")]
    UnknownComponent(ComponentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `crowd-*` crates.
pub type CrowdResult<T> = Result<T, CrowdError>;
