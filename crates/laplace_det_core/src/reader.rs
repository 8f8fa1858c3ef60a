//! Matrix text format
//!
//! A matrix file is a stream of whitespace-separated tokens: the order `n`
//! as a non-negative integer, followed by exactly `n * n` real numbers in
//! row-major order. Line breaks carry no meaning.

use crate::error::{DetError, Result};
use crate::matrix::entry_count;
use crate::Matrix;
use std::fs;
use std::path::Path;

/// Load a matrix from disk
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DetError::ReadMatrix {
        path: path.to_path_buf(),
        source,
    })?;
    let matrix = parse_matrix(&text)?;
    tracing::debug!(path = %path.display(), order = matrix.order(), "loaded matrix");
    Ok(matrix)
}

/// Parse a matrix from its text form
pub fn parse_matrix(text: &str) -> Result<Matrix> {
    let mut tokens = text.split_whitespace();

    let order_token = tokens
        .next()
        .ok_or_else(|| DetError::MalformedMatrix("missing matrix order".into()))?;
    let order: usize = order_token.parse().map_err(|_| {
        DetError::MalformedMatrix(format!("order '{}' is not a non-negative integer", order_token))
    })?;
    if order == 0 {
        return Err(DetError::EmptyMatrix);
    }

    let expected = entry_count(order)?;
    // The order token is untrusted; never reserve more than the text could hold.
    let mut data = Vec::with_capacity(expected.min(text.len() / 2 + 1));
    for idx in 0..expected {
        let token = tokens.next().ok_or_else(|| {
            DetError::MalformedMatrix(format!(
                "expected {} entries, found {} (row {} is incomplete)",
                expected,
                idx,
                idx / order + 1
            ))
        })?;
        let value: f64 = token.parse().map_err(|_| {
            DetError::MalformedMatrix(format!(
                "entry '{}' at row {}, column {} is not a number",
                token,
                idx / order + 1,
                idx % order + 1
            ))
        })?;
        data.push(value);
    }

    if let Some(extra) = tokens.next() {
        return Err(DetError::MalformedMatrix(format!(
            "unexpected token '{}' after {} entries",
            extra, expected
        )));
    }

    Matrix::from_flat(data, order)
}

/// Write a matrix in the same text form `parse_matrix` accepts
pub fn format_matrix(matrix: &Matrix) -> String {
    let n = matrix.order();
    let mut out = format!("{}\n", n);
    for i in 0..n {
        let row: Vec<String> = matrix.row(i).iter().map(|v| v.to_string()).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}
