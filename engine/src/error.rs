//! Error type shared by graph construction, import and the query entry points.

use crate::datastr::graph::NodeId;
use thiserror::Error;

/// Everything that can go wrong before or during a search.
///
/// Unreachable targets are not errors for distance queries, they yield `INFINITY`.
/// Only `compute_shortest_path` reports `NoPath`, because there is no node sequence to return.
#[derive(Debug, Error)]
pub enum Error {
    #[error("extract-min or peek-min on an empty queue")]
    EmptyQueue,
    #[error("invalid weight {weight} on arc {from} -> {to}")]
    InvalidWeight { from: NodeId, to: NodeId, weight: i64 },
    #[error("node {node} out of range for a graph with {num_nodes} nodes")]
    NodeOutOfRange { node: u64, num_nodes: usize },
    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },
    #[error("search budget exhausted after settling {settled_nodes} nodes")]
    Timeout { settled_nodes: usize },
    #[error("expected coordinates for {expected} nodes, got {actual}")]
    InvalidCoordinates { expected: usize, actual: usize },
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
