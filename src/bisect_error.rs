//! BisectError: unified error type for exact-bisect public APIs
//!
//! Every fallible operation in the crate (graph construction, matrix
//! loading, thread-pool setup, message decoding, and the distributed
//! protocol) reports through this enum instead of panicking.

use thiserror::Error;

/// Unified error type for exact-bisect operations.
#[derive(Debug, Error)]
pub enum BisectError {
    /// Underlying I/O failure while reading a graph file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A token in a weight-matrix file could not be parsed.
    #[error("Matrix parse error: {0}")]
    MatrixParse(String),
    /// The weight matrix did not contain exactly `V×V` entries.
    #[error(
        "Malformed matrix: expected {vertex_count}x{vertex_count} entries, \
         scanned {rows} full rows and {trailing} trailing entries"
    )]
    MalformedMatrix {
        vertex_count: usize,
        rows: usize,
        trailing: usize,
    },
    /// An edge references a vertex id outside `0..vertex_count`.
    #[error("Edge ({v1}, {v2}) references a vertex outside 0..{vertex_count}")]
    EdgeOutOfRange {
        v1: usize,
        v2: usize,
        vertex_count: usize,
    },
    /// Edge weights must be zero or positive; the search bounds rely on it.
    #[error("Edge ({v1}, {v2}) has negative weight {weight}")]
    NegativeWeight { v1: usize, v2: usize, weight: i64 },
    /// The rayon worker pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// A search configuration was rejected before the search started.
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),
    /// A configuration had the wrong number of labels for the graph.
    #[error("Configuration length mismatch: expected {expected} labels, got {actual}")]
    ConfigLength { expected: usize, actual: usize },
    /// A message payload had an unexpected size.
    #[error("Wire length mismatch: expected {expected} bytes, got {actual}")]
    WireLength { expected: usize, actual: usize },
    /// A message arrived with a tag outside the protocol.
    #[error("Unknown message tag {0}")]
    UnknownTag(u16),
    /// A label byte on the wire was not one of IN_X, IN_Y or UNDECIDED.
    #[error("Unknown vertex label {0} on the wire")]
    UnknownLabel(i8),
    /// A received configuration had a decided label after an undecided one.
    #[error("Decided label at position {position} follows an undecided one")]
    ScatteredLabels { position: usize },
    /// A valid message arrived at a point of the protocol that does not accept it.
    #[error("Unexpected message with tag {tag} from rank {from}")]
    UnexpectedMessage { from: usize, tag: u16 },
    /// A message was addressed to a rank outside the group.
    #[error("Rank {rank} is outside a group of size {size}")]
    NoSuchRank { rank: usize, size: usize },
    /// Point-to-point messaging was attempted on a group with no peers.
    #[error("Communicator has no peers to exchange messages with")]
    EmptyGroup,
}
