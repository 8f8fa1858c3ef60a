//! Multi-threaded cofactor expansion
//!
//! The first-level minors are split across `tasks_num` workers. Workers
//! 1..tasks_num run on scoped threads, worker 0 runs on the calling thread.
//! Leaving the scope joins every worker, and only then are the minors
//! combined along row 0.

use crate::error::Result;
use crate::partition::{partition, validate_tasks_num, MinorTask, MINOR_START_ROW};
use crate::serial::{combine, minor};
use crate::{ColumnSet, Matrix, Timings};
use std::thread;
use std::time::Instant;

/// Compute every minor in a bucket, in order
fn run_bucket(matrix: &Matrix, bucket: Vec<MinorTask<'_>>) {
    for task in bucket {
        let (value, _) = minor(matrix, MINOR_START_ROW, &task.live_cols, false);
        tracing::trace!(column = task.index, value, "minor computed");
        task.publish(value);
    }
}

/// Determinant using `tasks_num` parallel workers
///
/// # Arguments
/// * `matrix` - Matrix to evaluate, shared read only by all workers
/// * `tasks_num` - Number of workers, `1..=matrix.order()`
///
/// # Returns
/// * Determinant value
/// * Timings with `total_time` filled in
pub fn det_parallel(matrix: &Matrix, tasks_num: usize) -> Result<(f64, Timings)> {
    let n = matrix.order();
    validate_tasks_num(tasks_num, n)?;

    let mut timings = Timings {
        tasks_num,
        ..Timings::default()
    };
    let start = Instant::now();

    if n == 1 {
        timings.total_time = start.elapsed().as_secs_f64();
        return Ok((matrix.get(0, 0), timings));
    }

    let mut minors = vec![0.0; n];
    let mut buckets = partition(matrix, &mut minors, tasks_num)?.into_iter();
    let inline_bucket = buckets.next().unwrap_or_default();

    thread::scope(|scope| {
        for bucket in buckets {
            scope.spawn(move || run_bucket(matrix, bucket));
        }
        run_bucket(matrix, inline_bucket);
    });

    let value = combine(matrix.row(0), ColumnSet::full(n).as_slice(), &minors);
    timings.total_time = start.elapsed().as_secs_f64();

    tracing::debug!(
        order = n,
        tasks_num,
        total_ms = timings.total_ms(),
        "parallel determinant finished"
    );

    Ok((value, timings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetError;
    use crate::serial::det_serial;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_parallel_2x2() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        for k in 1..=2 {
            let (det, timings) = det_parallel(&m, k).unwrap();
            assert!(close(det, -2.0));
            assert_eq!(timings.tasks_num, k);
        }
    }

    #[test]
    fn test_parallel_3x3() {
        let m = Matrix::from_rows(&[[6.0, 1.0, 1.0], [4.0, -2.0, 5.0], [2.0, 8.0, 7.0]]).unwrap();
        for k in 1..=3 {
            let (det, _) = det_parallel(&m, k).unwrap();
            assert!(close(det, -306.0), "k={} det={}", k, det);
        }
    }

    #[test]
    fn test_parallel_matches_serial_for_every_task_count() {
        let m = Matrix::random(7, 20, 42).unwrap();
        let (expected, _) = det_serial(&m);
        for k in 1..=7 {
            let (det, _) = det_parallel(&m, k).unwrap();
            assert!(close(det, expected), "k={} det={} serial={}", k, det, expected);
        }
    }

    #[test]
    fn test_order_one_returns_entry() {
        let m = Matrix::from_rows(&[[3.25]]).unwrap();
        let (det, timings) = det_parallel(&m, 1).unwrap();
        assert_eq!(det, 3.25);
        assert_eq!(timings.parallelizable_time, 0.0);
    }

    #[test]
    fn test_identity() {
        for n in 1..=6 {
            let (det, _) = det_parallel(&Matrix::identity(n).unwrap(), n).unwrap();
            assert!(close(det, 1.0));
        }
    }

    #[test]
    fn test_invalid_task_counts_fail_fast() {
        let m = Matrix::identity(3).unwrap();
        assert!(matches!(
            det_parallel(&m, 0),
            Err(DetError::InvalidTaskCount { tasks_num: 0, order: 3 })
        ));
        assert!(matches!(
            det_parallel(&m, 4),
            Err(DetError::InvalidTaskCount { tasks_num: 4, order: 3 })
        ));
        let one = Matrix::identity(1).unwrap();
        assert!(det_parallel(&one, 2).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn proptest_task_count_does_not_change_result(
            n in 1usize..7,
            seed in any::<u64>(),
            k_pick in 0usize..64,
        ) {
            let m = Matrix::random(n, 9, seed).unwrap();
            let k = 1 + k_pick % n;
            let (serial, _) = det_serial(&m);
            let (parallel, _) = det_parallel(&m, k).unwrap();
            prop_assert!(close(serial, parallel), "n={} k={} {} vs {}", n, k, serial, parallel);
        }

        #[test]
        fn proptest_row_swap_negates(n in 2usize..7, seed in any::<u64>()) {
            let m = Matrix::random(n, 9, seed).unwrap();
            let (det, _) = det_parallel(&m, n).unwrap();
            let (swapped, _) = det_parallel(&m.swap_rows(0, 1), n).unwrap();
            prop_assert!(close(swapped, -det));
        }
    }
}
