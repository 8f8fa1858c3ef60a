//! Error types for determinant engines and matrix loading

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetError {
    #[error("Failed to read matrix file {}: {source}", .path.display())]
    ReadMatrix {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Matrix must have order at least 1")]
    EmptyMatrix,

    #[error("Matrix is not square: {rows} rows, row {row} has {cols} entries")]
    NotSquare { rows: usize, row: usize, cols: usize },

    #[error("Malformed matrix input: {0}")]
    MalformedMatrix(String),

    #[error("Invalid task count {tasks_num} for matrix of order {order} (expected 1..={order})")]
    InvalidTaskCount { tasks_num: usize, order: usize },

    #[error("Result slot count mismatch: expected {expected}, got {actual}")]
    SlotCountMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, DetError>;
