#![cfg_attr(docsrs, feature(doc_cfg))]
//! # exact-bisect
//!
//! Exact minimum-weight graph bisection. Given a weighted graph and the
//! required size of the smaller set X, the search finds a split of the
//! vertices into X and Y minimising the total weight of edges running from X
//! to Y. It enumerates assignments depth-first and prunes with
//! - a size bound (neither side may overflow),
//! - the weight already cut by the decided prefix, and
//! - a per-vertex lower bound on what the undecided suffix will add.
//!
//! ## Execution
//! - [`algs::search_sequential`]: single-threaded reference walk.
//! - [`search`]: shared-memory search on a rayon pool, either draining a
//!   pre-generated task pool or splitting the tree with fork/join.
//! - [`search_distributed`]: master/worker protocol over any
//!   [`Communicator`](algs::communicator::Communicator); an in-process
//!   backend ships by default and an MPI backend behind `mpi-support`.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! exact-bisect = "0.3"
//! # features = ["mpi-support"]
//! ```
//!
//! Results are reported as a [`Bisection`]; a weight of
//! [`INFINITE_WEIGHT`](graph::INFINITE_WEIGHT) means no balanced split exists.

pub mod algs;
pub mod bisect_error;
pub mod config;
pub mod graph;
pub mod io;

pub use algs::best::Bisection;
pub use algs::{search, search_distributed};
pub use bisect_error::BisectError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::assignment::{Configuration, Label};
    pub use crate::algs::best::{Bisection, SharedBest};
    pub use crate::algs::communicator::{Communicator, NoComm, RayonComm, Source};
    #[cfg(feature = "mpi-support")]
    pub use crate::algs::communicator::MpiComm;
    pub use crate::algs::{brute_force, search, search_distributed, search_sequential};
    pub use crate::bisect_error::BisectError;
    pub use crate::config::{SearchConfig, Strategy};
    pub use crate::graph::{Edge, Graph, INFINITE_WEIGHT, VertexId, Weight};
    pub use crate::io::MatrixReader;
}
