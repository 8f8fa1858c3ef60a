//! CSV results sink
//!
//! Both record sets are append-or-create: the header goes in only when the
//! target file is new or empty, so repeated runs accumulate rows.

use anyhow::{Context, Result};
use laplace_det_core::ScalingResult;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Implementation tag written with every execution row
pub const IMPLEMENTATION: &str = "rust";

pub const EXECUTION_HEADER: &str = "n,exec_time_ms,serial,implementation";

pub const SCALING_HEADER: &str = "matrix_order,serial_exec_time_ms,parallel_tasks_num,\
parallel_exec_time_ms,achieved_speedup,max_theoretical_speedup";

/// Timing of one determinant calculation
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub matrix_order: usize,
    pub determinant: f64,
    pub exec_time_ms: f64,
    pub serial: bool,
}

fn open_with_header(path: &Path, header: &str) -> Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Unable to access results file {}", path.display()))?;
    let is_empty = file
        .metadata()
        .with_context(|| format!("Unable to stat results file {}", path.display()))?
        .len()
        == 0;

    let mut writer = BufWriter::new(file);
    if is_empty {
        writeln!(writer, "{}", header)?;
    }
    Ok(writer)
}

/// Append per-matrix execution rows
pub fn append_execution_results(path: &Path, results: &[ExecutionResult]) -> Result<()> {
    let mut writer = open_with_header(path, EXECUTION_HEADER)?;
    for result in results {
        writeln!(
            writer,
            "{},{:.3},{},{}",
            result.matrix_order, result.exec_time_ms, result.serial, IMPLEMENTATION
        )?;
    }
    writer
        .flush()
        .with_context(|| format!("Unable to write results file {}", path.display()))?;

    tracing::debug!(path = %path.display(), rows = results.len(), "appended execution results");
    Ok(())
}

/// Append scaling experiment rows
pub fn append_scaling_results(path: &Path, results: &[ScalingResult]) -> Result<()> {
    let mut writer = open_with_header(path, SCALING_HEADER)?;
    for r in results {
        writeln!(
            writer,
            "{},{:.3},{},{:.3},{:.6},{:.6}",
            r.matrix_order,
            r.serial_exec_time_ms,
            r.parallel_tasks_num,
            r.parallel_exec_time_ms,
            r.achieved_speedup,
            r.max_theoretical_speedup
        )?;
    }
    writer
        .flush()
        .with_context(|| format!("Unable to write results file {}", path.display()))?;

    tracing::debug!(path = %path.display(), rows = results.len(), "appended scaling results");
    Ok(())
}
