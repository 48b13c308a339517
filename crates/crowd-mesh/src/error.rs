//! Error types for crowd-mesh.

use thiserror::Error;

use crowd_core::NodeId;

/// Errors produced by mesh loading, queries and route planning.
#[derive(Debug, Error)]
pub enum MeshError {
    /// No portal sequence of sufficient width connects the two nodes.
    #[error("no route from node {from} to node {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// Structural problem detected while building a mesh.
    #[error("invalid mesh: {0}")]
    Invalid(String),

    /// Mesh file syntax error with a 1-based line number.
    #[error("parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, MeshError>`.
pub type MeshResult<T> = Result<T, MeshError>;
