//! Graph file readers.

pub mod matrix;

pub use matrix::MatrixReader;
