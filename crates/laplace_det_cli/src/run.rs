//! Per-matrix determinant runs
//!
//! Every matrix is evaluated with the serial engine and then with the
//! parallel engine using one worker per first-row column.

use crate::export::{append_execution_results, ExecutionResult};
use anyhow::{bail, Context, Result};
use laplace_det_core::{det_parallel, det_serial, read_matrix, Matrix};
use std::path::{Path, PathBuf};

/// Run both engines over each matrix file, then append rows to the results CSV
///
/// `paths` holds one or more matrix files followed by the results file.
pub fn run_matrices(paths: &[PathBuf]) -> Result<()> {
    let Some((results_path, matrix_paths)) = paths.split_last() else {
        bail!("expected matrix files followed by a results file");
    };
    if matrix_paths.is_empty() {
        bail!("no matrix files given before results file {}", results_path.display());
    }

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║           Laplace Determinant - Serial vs Parallel            ║");
    println!("╚══════════════════════════════════════════════════════════════╝");

    let mut results = Vec::with_capacity(matrix_paths.len() * 2);

    for path in matrix_paths {
        let matrix = read_matrix(path)
            .with_context(|| format!("Failed to load matrix {}", path.display()))?;
        println!();
        println!("Successfully loaded matrix: {}", path.display());
        println!("Calculating determinants...");
        println!();

        results.extend(run_single_matrix(&matrix)?);

        if matrix_paths.len() > 1 {
            println!("====================");
        }
    }

    print_summary(&results);

    append_execution_results(results_path, &results)?;
    println!("\nResults appended to: {}", results_path.display());
    Ok(())
}

/// Serial then parallel (tasks = order) run of one matrix
pub fn run_single_matrix(matrix: &Matrix) -> Result<[ExecutionResult; 2]> {
    let n = matrix.order();

    let (serial_det, serial_timings) = det_serial(matrix);
    println!("Serial calculation result:\ndet(mat) = {}", serial_det);
    println!("Serial calculation took {:.3} ms.\n", serial_timings.total_ms());

    let (parallel_det, parallel_timings) = det_parallel(matrix, n)?;
    println!("Parallel calculation result:\ndet(mat) = {}", parallel_det);
    println!(
        "Parallel calculation with {} tasks took {:.3} ms.\n",
        n,
        parallel_timings.total_ms()
    );

    Ok([
        ExecutionResult {
            matrix_order: n,
            determinant: serial_det,
            exec_time_ms: serial_timings.total_ms(),
            serial: true,
        },
        ExecutionResult {
            matrix_order: n,
            determinant: parallel_det,
            exec_time_ms: parallel_timings.total_ms(),
            serial: false,
        },
    ])
}

fn print_summary(results: &[ExecutionResult]) {
    println!();
    println!("┌─────────┬──────────┬──────────────────────┬────────────┐");
    println!("│  Order  │  Engine  │     Determinant      │  Time(ms)  │");
    println!("├─────────┼──────────┼──────────────────────┼────────────┤");
    for r in results {
        println!(
            "│ {:>7} │ {:>8} │ {:>20.6e} │ {:>10.3} │",
            r.matrix_order,
            if r.serial { "serial" } else { "parallel" },
            r.determinant,
            r.exec_time_ms
        );
    }
    println!("└─────────┴──────────┴──────────────────────┴────────────┘");
}

/// Write a seeded random matrix in the reader's text format
pub fn generate_matrix(order: usize, bound: i32, seed: u64, output: &Path) -> Result<()> {
    let matrix = Matrix::random(order, bound, seed)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(output, laplace_det_core::format_matrix(&matrix))
        .with_context(|| format!("Failed to write matrix file {}", output.display()))?;

    tracing::info!(order, seed, path = %output.display(), "generated matrix");
    println!("Wrote {}x{} matrix to {}", order, order, output.display());
    Ok(())
}
