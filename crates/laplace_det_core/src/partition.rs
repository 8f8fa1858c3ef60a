//! Round-robin partitioning of first-level minors
//!
//! Expanding along row 0 needs n independent minors of order n-1. Each one
//! becomes a [`MinorTask`] that owns the single result slot it writes, and
//! task `i` is assigned to worker `i % tasks_num`.

use crate::error::{DetError, Result};
use crate::{ColumnSet, Matrix};

/// First row of every first-level minor
pub const MINOR_START_ROW: usize = 1;

/// One first-level minor to compute
#[derive(Debug)]
pub struct MinorTask<'a> {
    /// Position of the minor in first-row order
    pub index: usize,
    /// Columns of the submatrix (row 0 is always excluded)
    pub live_cols: ColumnSet,
    slot: &'a mut f64,
}

impl<'a> MinorTask<'a> {
    /// Store the computed minor. Consumes the task so a slot is written once.
    pub fn publish(self, value: f64) {
        *self.slot = value;
    }
}

/// Check that `tasks_num` workers can share a matrix of order `order`
pub fn validate_tasks_num(tasks_num: usize, order: usize) -> Result<()> {
    if tasks_num == 0 || tasks_num > order {
        return Err(DetError::InvalidTaskCount { tasks_num, order });
    }
    Ok(())
}

/// Build one task per first-row column and deal them round-robin
///
/// `slots` must hold exactly `matrix.order()` cells; task `i` receives
/// exclusive ownership of `slots[i]`.
///
/// # Returns
/// One bucket per worker, tasks in assignment order.
pub fn partition<'a>(
    matrix: &Matrix,
    slots: &'a mut [f64],
    tasks_num: usize,
) -> Result<Vec<Vec<MinorTask<'a>>>> {
    let n = matrix.order();
    validate_tasks_num(tasks_num, n)?;
    if slots.len() != n {
        return Err(DetError::SlotCountMismatch {
            expected: n,
            actual: slots.len(),
        });
    }

    let all_cols = ColumnSet::full(n);
    let mut buckets: Vec<Vec<MinorTask<'a>>> = (0..tasks_num)
        .map(|w| Vec::with_capacity(n / tasks_num + usize::from(w < n % tasks_num)))
        .collect();

    for (index, slot) in slots.iter_mut().enumerate() {
        buckets[index % tasks_num].push(MinorTask {
            index,
            live_cols: all_cols.remove(index),
            slot,
        });
    }

    tracing::debug!(
        order = n,
        tasks_num,
        largest_bucket = buckets[0].len(),
        "partitioned first-level minors"
    );

    Ok(buckets)
}
