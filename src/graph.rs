//! Weighted edge-list graph consumed by the search.
//!
//! The graph is a vertex count plus an ordered list of weighted edges. Edges
//! are stored exactly as they were added: `(v1, v2)` is an ordered pair and the
//! cut weight only counts an edge when `v1` lies in X and `v2` lies in Y. A
//! symmetric weight matrix therefore produces both orientations of every edge.
//! Duplicate edges are kept and each contributes its own weight.

use crate::bisect_error::BisectError;
use std::fmt;

/// Dense vertex identifier in `0..vertex_count`.
pub type VertexId = usize;

/// Edge and cut weights. Wide enough for the sum of every edge weight.
pub type Weight = i64;

/// Sentinel for "no solution found yet".
pub const INFINITE_WEIGHT: Weight = Weight::MAX;

/// One weighted, ordered edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub v1: VertexId,
    pub v2: VertexId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(v1: VertexId, v2: VertexId, weight: Weight) -> Self {
        Self { v1, v2, weight }
    }
}

/// Immutable-after-load weighted graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    vertex_count: usize,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates a graph with `vertex_count` isolated vertices.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
        }
    }

    /// Builds a graph from `(v1, v2, weight)` triples.
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Result<Self, BisectError>
    where
        I: IntoIterator<Item = (VertexId, VertexId, Weight)>,
    {
        let mut graph = Self::new(vertex_count);
        for (v1, v2, weight) in edges {
            graph.add_edge(v1, v2, weight)?;
        }
        Ok(graph)
    }

    /// Appends an edge, rejecting endpoints outside the vertex range and
    /// negative weights.
    pub fn add_edge(
        &mut self,
        v1: VertexId,
        v2: VertexId,
        weight: Weight,
    ) -> Result<(), BisectError> {
        if v1 >= self.vertex_count || v2 >= self.vertex_count {
            return Err(BisectError::EdgeOutOfRange {
                v1,
                v2,
                vertex_count: self.vertex_count,
            });
        }
        if weight < 0 {
            return Err(BisectError::NegativeWeight { v1, v2, weight });
        }
        self.edges.push(Edge::new(v1, v2, weight));
        Ok(())
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Sum of all edge weights; an upper bound for any cut.
    pub fn total_weight(&self) -> Weight {
        self.edges.iter().map(|e| e.weight).sum()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vertex count: {}", self.vertex_count)?;
        writeln!(f, "edges:")?;
        for e in &self.edges {
            writeln!(f, "vId1: {}, vId2: {}, weight: {}", e.v1, e.v2, e.weight)?;
        }
        Ok(())
    }
}
