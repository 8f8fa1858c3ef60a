//! Strong and weak scaling harness
//!
//! # Strategy
//!
//! A serial baseline run reports its total time `T` and the time `P` spent in
//! first-level minors. That gives the code split
//!   parallel_share = P / T,  serial_share = 1 - parallel_share
//!
//! Strong scaling keeps one matrix and varies the worker count `p`, comparing
//! the achieved speedup against Amdahl's bound
//!   S(p) = 1 / (serial_share + parallel_share / p)
//!
//! Weak scaling grows the matrix order `n` together with the worker count
//! (`p = n`) and compares against Gustafson's scaled speedup
//!   S(p) = serial_share + parallel_share * p
//!
//! Weak scaling reuses the shares measured by strong scaling. They are passed
//! in explicitly as [`CodeShares`], so the phase ordering shows up in the
//! signatures.

use crate::error::{DetError, Result};
use crate::parallel::det_parallel;
use crate::partition::validate_tasks_num;
use crate::serial::det_serial;
use crate::{Matrix, Timings};
use std::path::PathBuf;

/// Serial/parallelizable split of a serial run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodeShares {
    pub serial_share: f64,
    pub parallel_share: f64,
}

impl CodeShares {
    /// Derive shares from a serial run's total and parallelizable times
    ///
    /// A zero baseline carries no information, so it counts as fully serial.
    pub fn from_serial_run(serial_time: f64, parallelizable_time: f64) -> Self {
        let parallel_share = if serial_time > 0.0 {
            (parallelizable_time / serial_time).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            serial_share: 1.0 - parallel_share,
            parallel_share,
        }
    }

    pub fn from_timings(timings: &Timings) -> Self {
        Self::from_serial_run(timings.total_time, timings.parallelizable_time)
    }

    /// Amdahl's law: best speedup for a fixed problem on `tasks_num` workers
    pub fn amdahl_speedup(&self, tasks_num: usize) -> f64 {
        1.0 / (self.serial_share + self.parallel_share / tasks_num as f64)
    }

    /// Gustafson's law: scaled speedup when the problem grows with `tasks_num`
    pub fn gustafson_speedup(&self, tasks_num: usize) -> f64 {
        self.serial_share + self.parallel_share * tasks_num as f64
    }
}

/// Ratio of serial to parallel time; exactly 1.0 when both are zero
pub fn achieved_speedup(serial_exec_time_ms: f64, parallel_exec_time_ms: f64) -> f64 {
    if serial_exec_time_ms == 0.0 && parallel_exec_time_ms == 0.0 {
        1.0
    } else {
        serial_exec_time_ms / parallel_exec_time_ms
    }
}

/// One scaling measurement
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingResult {
    pub matrix_order: usize,
    pub serial_exec_time_ms: f64,
    pub parallel_tasks_num: usize,
    pub parallel_exec_time_ms: f64,
    pub achieved_speedup: f64,
    pub max_theoretical_speedup: f64,
}

/// Output of a strong scaling run
#[derive(Debug, Clone)]
pub struct StrongScaling {
    /// Shares measured on the serial baseline, input for weak scaling
    pub shares: CodeShares,
    pub serial_exec_time_ms: f64,
    /// One entry per task count, ascending
    pub results: Vec<ScalingResult>,
}

/// Fixed matrix, task counts `1..=max_tasks`
pub fn strong_scaling(matrix: &Matrix, max_tasks: usize) -> Result<StrongScaling> {
    let n = matrix.order();
    validate_tasks_num(max_tasks, n)?;

    let (_, serial_timings) = det_serial(matrix);
    let serial_ms = serial_timings.total_ms();
    let shares = CodeShares::from_timings(&serial_timings);
    if serial_timings.total_time == 0.0 {
        tracing::warn!(order = n, "serial baseline measured zero time, treating as fully serial");
    }

    tracing::info!(
        order = n,
        serial_ms,
        parallel_share = shares.parallel_share,
        serial_share = shares.serial_share,
        "strong scaling baseline"
    );

    let mut results = Vec::with_capacity(max_tasks);
    for tasks_num in 1..=max_tasks {
        let (_, timings) = det_parallel(matrix, tasks_num)?;
        let parallel_ms = timings.total_ms();
        let result = ScalingResult {
            matrix_order: n,
            serial_exec_time_ms: serial_ms,
            parallel_tasks_num: tasks_num,
            parallel_exec_time_ms: parallel_ms,
            achieved_speedup: achieved_speedup(serial_ms, parallel_ms),
            max_theoretical_speedup: shares.amdahl_speedup(tasks_num),
        };
        tracing::info!(
            order = n,
            tasks_num,
            parallel_ms,
            speedup = result.achieved_speedup,
            amdahl = result.max_theoretical_speedup,
            "strong scaling step"
        );
        results.push(result);
    }

    Ok(StrongScaling {
        shares,
        serial_exec_time_ms: serial_ms,
        results,
    })
}

/// Growing matrices with `tasks_num = order`, bounded by Gustafson's law
///
/// `load` supplies the matrix for each order. `shares` come from a prior
/// [`strong_scaling`] run.
pub fn weak_scaling<F>(orders: &[usize], shares: &CodeShares, mut load: F) -> Result<Vec<ScalingResult>>
where
    F: FnMut(usize) -> Result<Matrix>,
{
    let mut results = Vec::with_capacity(orders.len());

    for &order in orders {
        let matrix = load(order)?;
        let n = matrix.order();
        if n != order {
            return Err(DetError::MalformedMatrix(format!(
                "requested order {} but loaded a matrix of order {}",
                order, n
            )));
        }

        let (_, serial_timings) = det_serial(&matrix);
        let (_, parallel_timings) = det_parallel(&matrix, n)?;
        let serial_ms = serial_timings.total_ms();
        let parallel_ms = parallel_timings.total_ms();

        let result = ScalingResult {
            matrix_order: n,
            serial_exec_time_ms: serial_ms,
            parallel_tasks_num: n,
            parallel_exec_time_ms: parallel_ms,
            achieved_speedup: achieved_speedup(serial_ms, parallel_ms),
            max_theoretical_speedup: shares.gustafson_speedup(n),
        };
        tracing::info!(
            order = n,
            serial_ms,
            parallel_ms,
            speedup = result.achieved_speedup,
            gustafson = result.max_theoretical_speedup,
            "weak scaling step"
        );
        results.push(result);
    }

    Ok(results)
}

/// Configuration for a scaling experiment
#[derive(Debug, Clone)]
pub struct ScalingConfig {
    /// Directory holding `matrica{n}x{n}.txt` files
    pub matrix_dir: PathBuf,
    /// Order of the fixed strong scaling matrix
    pub strong_order: usize,
    /// Orders visited by weak scaling
    pub weak_orders: Vec<usize>,
    /// Generate seeded random matrices instead of reading files
    pub synthetic: bool,
    pub seed: u64,
    /// Entry bound for synthetic matrices
    pub bound: i32,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            matrix_dir: PathBuf::from("test_data"),
            strong_order: 10,
            weak_orders: vec![3, 5, 8, 9, 10, 11],
            synthetic: false,
            seed: 42,
            bound: 100,
        }
    }
}

impl ScalingConfig {
    /// Path of the test matrix of the given order
    pub fn matrix_path(&self, order: usize) -> PathBuf {
        self.matrix_dir.join(format!("matrica{}x{}.txt", order, order))
    }

    /// Read or generate the matrix of the given order
    pub fn load_matrix(&self, order: usize) -> Result<Matrix> {
        if self.synthetic {
            Matrix::random(order, self.bound, self.seed.wrapping_add(order as u64))
        } else {
            crate::reader::read_matrix(self.matrix_path(order))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speedup_zero_times_is_one() {
        assert_eq!(achieved_speedup(0.0, 0.0), 1.0);
        assert_eq!(achieved_speedup(10.0, 4.0), 2.5);
    }

    #[test]
    fn test_shares_from_serial_run() {
        let shares = CodeShares::from_serial_run(100.0, 80.0);
        assert!((shares.parallel_share - 0.8).abs() < 1e-12);
        assert!((shares.serial_share - 0.2).abs() < 1e-12);

        let zero = CodeShares::from_serial_run(0.0, 0.0);
        assert_eq!(zero.parallel_share, 0.0);
        assert_eq!(zero.serial_share, 1.0);

        let over = CodeShares::from_serial_run(1.0, 2.0);
        assert_eq!(over.parallel_share, 1.0);
    }

    #[test]
    fn test_amdahl_and_gustafson() {
        let shares = CodeShares::from_serial_run(100.0, 80.0);
        // 1 / (0.2 + 0.8 / 4) = 2.5
        assert!((shares.amdahl_speedup(4) - 2.5).abs() < 1e-12);
        assert!((shares.amdahl_speedup(1) - 1.0).abs() < 1e-12);
        // 0.2 + 0.8 * 4 = 3.4
        assert!((shares.gustafson_speedup(4) - 3.4).abs() < 1e-12);
    }

    #[test]
    fn test_strong_scaling_visits_every_task_count() {
        let m = Matrix::random(6, 10, 5).unwrap();
        let strong = strong_scaling(&m, 6).unwrap();

        let counts: Vec<usize> = strong.results.iter().map(|r| r.parallel_tasks_num).collect();
        assert_eq!(counts, vec![1, 2, 3, 4, 5, 6]);
        for r in &strong.results {
            assert_eq!(r.matrix_order, 6);
            assert_eq!(r.serial_exec_time_ms, strong.serial_exec_time_ms);
            assert_eq!(r.max_theoretical_speedup, strong.shares.amdahl_speedup(r.parallel_tasks_num));
        }
        let total = strong.shares.serial_share + strong.shares.parallel_share;
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_strong_scaling_rejects_bad_max_tasks() {
        let m = Matrix::identity(3).unwrap();
        assert!(matches!(
            strong_scaling(&m, 4),
            Err(DetError::InvalidTaskCount { tasks_num: 4, order: 3 })
        ));
        assert!(strong_scaling(&m, 0).is_err());
    }

    #[test]
    fn test_weak_scaling_uses_given_shares() {
        let shares = CodeShares {
            serial_share: 0.25,
            parallel_share: 0.75,
        };
        let results = weak_scaling(&[2, 3, 5], &shares, |n| Matrix::random(n, 10, n as u64)).unwrap();

        assert_eq!(results.len(), 3);
        for r in &results {
            assert_eq!(r.parallel_tasks_num, r.matrix_order);
            assert_eq!(r.max_theoretical_speedup, 0.25 + 0.75 * r.matrix_order as f64);
        }
    }

    #[test]
    fn test_weak_scaling_propagates_load_errors() {
        let shares = CodeShares::from_serial_run(1.0, 0.5);
        let result = weak_scaling(&[3], &shares, |_| Err(DetError::EmptyMatrix));
        assert!(matches!(result, Err(DetError::EmptyMatrix)));

        let result = weak_scaling(&[3], &shares, |_| Matrix::identity(2));
        assert!(matches!(result, Err(DetError::MalformedMatrix(_))));
    }

    #[test]
    fn test_config_paths_and_synthetic_loading() {
        let config = ScalingConfig {
            synthetic: true,
            ..ScalingConfig::default()
        };
        assert_eq!(
            config.matrix_path(5),
            PathBuf::from("test_data").join("matrica5x5.txt")
        );
        assert_eq!(config.load_matrix(4).unwrap().order(), 4);
        assert_eq!(config.load_matrix(4).unwrap(), config.load_matrix(4).unwrap());
    }
}
