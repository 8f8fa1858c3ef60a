//! Serial cofactor-expansion determinant
//!
//! Expands along the first live row. When asked to, the top-level call also
//! records how long its direct child minors took: those are exactly the work
//! units the parallel engine hands out, so their sum is the parallelizable
//! share of a run.

use crate::{ColumnSet, Matrix, Timings};
use std::time::{Duration, Instant};

/// Compute the minor of `matrix` rooted at `start_row` over `live_cols`
///
/// # Arguments
/// * `matrix` - Full matrix, read only
/// * `start_row` - First row of the submatrix in the original matrix
/// * `live_cols` - Original column indices present in the submatrix
/// * `measure_parallelizable` - Sum the wall time of the direct child minors
///
/// # Returns
/// * Value of the minor
/// * Summed child time (zero unless measuring, and zero at the base case)
pub fn minor(
    matrix: &Matrix,
    start_row: usize,
    live_cols: &ColumnSet,
    measure_parallelizable: bool,
) -> (f64, Duration) {
    let cols = live_cols.as_slice();
    if cols.len() == 1 {
        return (matrix.get(start_row, cols[0]), Duration::ZERO);
    }

    let mut parallelizable = Duration::ZERO;
    let mut minors = Vec::with_capacity(cols.len());

    for &col in cols {
        let reduced = live_cols.remove(col);
        if measure_parallelizable {
            let child_start = Instant::now();
            let (value, _) = minor(matrix, start_row + 1, &reduced, false);
            parallelizable += child_start.elapsed();
            minors.push(value);
        } else {
            minors.push(minor(matrix, start_row + 1, &reduced, false).0);
        }
    }

    (combine(matrix.row(start_row), cols, &minors), parallelizable)
}

/// Signed sum of `row[cols[j]] * minors[j]`, signs alternating from +
pub(crate) fn combine(row: &[f64], cols: &[usize], minors: &[f64]) -> f64 {
    let mut result = 0.0;
    let mut sign = 1.0;
    for (&col, &m) in cols.iter().zip(minors) {
        result += sign * row[col] * m;
        sign = -sign;
    }
    result
}

/// Determinant using the single-threaded engine
///
/// # Returns
/// * Determinant value
/// * Timings with `total_time` and `parallelizable_time` filled in
pub fn det_serial(matrix: &Matrix) -> (f64, Timings) {
    let mut timings = Timings {
        tasks_num: 1,
        ..Timings::default()
    };
    let start = Instant::now();

    let (value, parallelizable) = minor(matrix, 0, &ColumnSet::full(matrix.order()), true);

    timings.total_time = start.elapsed().as_secs_f64();
    timings.parallelizable_time = parallelizable.as_secs_f64();

    tracing::debug!(
        order = matrix.order(),
        total_ms = timings.total_ms(),
        parallelizable_ms = timings.parallelizable_ms(),
        "serial determinant finished"
    );

    (value, timings)
}
