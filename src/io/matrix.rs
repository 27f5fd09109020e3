//! Weight-matrix graph reader.
//!
//! # Format
//! Whitespace-separated integers. The first token is the vertex count `V`,
//! followed by a row-major `V×V` weight matrix. A non-zero cell `(row, col)`
//! becomes one edge `row -> col`; zero means "no edge".
//!
//! # Limitations
//! - Symmetry is not checked. An asymmetric matrix yields whatever directed
//!   edges its non-zero cells describe.
//! - The diagonal is read like any other cell.

use crate::bisect_error::BisectError;
use crate::graph::{Graph, Weight};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reader for the square weight-matrix text format.
#[derive(Debug, Default, Clone)]
pub struct MatrixReader;

impl MatrixReader {
    fn parse_token<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, BisectError> {
        raw.parse::<T>()
            .map_err(|_| BisectError::MatrixParse(format!("invalid {what}: {raw}")))
    }

    /// Parses a graph from any reader.
    pub fn read<R: Read>(&self, mut reader: R) -> Result<Graph, BisectError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let mut tokens = text.split_ascii_whitespace();

        let vertex_count: usize = Self::parse_token(
            tokens
                .next()
                .ok_or_else(|| BisectError::MatrixParse("missing vertex count".into()))?,
            "vertex count",
        )?;

        let cells = tokens
            .map(|raw| Self::parse_token::<Weight>(raw, "weight"))
            .collect::<Result<Vec<_>, _>>()?;

        // row/column consistency is only checked once the whole matrix was scanned
        let expected = vertex_count.checked_mul(vertex_count).ok_or_else(|| {
            BisectError::MatrixParse(format!("vertex count {vertex_count} is too large"))
        })?;
        if cells.len() != expected {
            let (rows, trailing) = match vertex_count {
                0 => (0, cells.len()),
                n => (cells.len() / n, cells.len() % n),
            };
            return Err(BisectError::MalformedMatrix {
                vertex_count,
                rows,
                trailing,
            });
        }

        let mut graph = Graph::new(vertex_count);
        for (idx, &weight) in cells.iter().enumerate() {
            if weight != 0 {
                graph.add_edge(idx / vertex_count, idx % vertex_count, weight)?;
            }
        }
        log::debug!(
            "loaded weight matrix: {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Opens and parses a matrix file.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Graph, BisectError> {
        let file = File::open(path)?;
        self.read(BufReader::new(file))
    }
}
