//! Laplace Determinant Core Library
//!
//! Cofactor-expansion determinant engines instrumented for scaling experiments.
//!
//! # Overview
//!
//! The determinant is computed by recursive Laplace expansion along the first
//! row, once on a single thread and once with the first-level minors spread
//! over a fixed number of worker threads. The serial engine also measures how
//! much of its run was spent in those first-level minors, which yields the
//! serial/parallel code split fed into Amdahl's and Gustafson's laws.
//!
//! # Key Components
//!
//! - [`columns`] - Live column sets used instead of copying submatrices
//! - [`serial`] - Recursive minor expansion with parallelizable-time measurement
//! - [`partition`] - Round-robin assignment of first-level minors to workers
//! - [`parallel`] - Scoped-thread determinant engine
//! - [`scaling`] - Strong and weak scaling harness
//! - [`reader`] - Whitespace matrix file format

pub mod columns;
pub mod error;
pub mod matrix;
pub mod parallel;
pub mod partition;
pub mod reader;
pub mod scaling;
pub mod serial;

pub use columns::ColumnSet;
pub use error::{DetError, Result};
pub use matrix::Matrix;
pub use parallel::det_parallel;
pub use partition::{partition, MinorTask};
pub use reader::{format_matrix, parse_matrix, read_matrix};
pub use scaling::{
    achieved_speedup, strong_scaling, weak_scaling, CodeShares, ScalingConfig, ScalingResult,
    StrongScaling,
};
pub use serial::{det_serial, minor};

/// Timing breakdown for one determinant run
#[derive(Debug, Clone, Default)]
pub struct Timings {
    /// Wall time of the whole call, seconds
    pub total_time: f64,
    /// Summed wall time of the first-level minors, seconds (serial engine only)
    pub parallelizable_time: f64,
    /// Workers used (1 for the serial engine)
    pub tasks_num: usize,
}

impl Timings {
    pub fn total_ms(&self) -> f64 {
        self.total_time * 1000.0
    }

    pub fn parallelizable_ms(&self) -> f64 {
        self.parallelizable_time * 1000.0
    }
}
