//! Dense square matrix
//!
//! Row-major storage of `f64` entries. A `Matrix` is immutable once built;
//! the engines only ever read it through shared references.

use crate::error::{DetError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Square matrix in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    order: usize,
}

/// Number of entries `order * order`, rejecting orders whose square overflows
pub(crate) fn entry_count(order: usize) -> Result<usize> {
    order
        .checked_mul(order)
        .ok_or_else(|| DetError::MalformedMatrix(format!("order {} is too large", order)))
}

impl Matrix {
    /// Create a matrix from a flat vector (row-major order)
    pub fn from_flat(data: Vec<f64>, order: usize) -> Result<Self> {
        if order == 0 {
            return Err(DetError::EmptyMatrix);
        }
        let expected = entry_count(order)?;
        if data.len() != expected {
            return Err(DetError::MalformedMatrix(format!(
                "expected {} entries for order {}, got {}",
                expected,
                order,
                data.len()
            )));
        }
        Ok(Self { data, order })
    }

    /// Create a matrix from nested rows, checking that it is square
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let order = rows.len();
        if order == 0 {
            return Err(DetError::EmptyMatrix);
        }

        let mut data = Vec::with_capacity(entry_count(order)?);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != order {
                return Err(DetError::NotSquare {
                    rows: order,
                    row,
                    cols: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        Ok(Self { data, order })
    }

    /// Create an identity matrix
    pub fn identity(order: usize) -> Result<Self> {
        let mut data = vec![0.0; entry_count(order)?];
        for i in 0..order {
            data[i * order + i] = 1.0;
        }
        Self::from_flat(data, order)
    }

    /// Seeded random matrix with integer-valued entries in `[-bound, bound]`
    ///
    /// A negative bound is taken by magnitude; `i32::MIN` saturates to `i32::MAX`.
    pub fn random(order: usize, bound: i32, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let bound = bound.checked_abs().unwrap_or(i32::MAX);
        let data: Vec<f64> = (0..entry_count(order)?)
            .map(|_| f64::from(rng.gen_range(-bound..=bound)))
            .collect();
        Self::from_flat(data, order)
    }

    /// Number of rows (and columns)
    pub fn order(&self) -> usize {
        self.order
    }

    /// Entry at (i, j)
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.order + j]
    }

    /// Get a row as a slice
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.order;
        &self.data[start..start + self.order]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Copy of this matrix with rows `a` and `b` exchanged
    pub fn swap_rows(&self, a: usize, b: usize) -> Self {
        let mut data = self.data.clone();
        if a != b {
            for j in 0..self.order {
                data.swap(a * self.order + j, b * self.order + j);
            }
        }
        Self {
            data,
            order: self.order,
        }
    }
}
