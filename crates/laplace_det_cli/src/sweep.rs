//! Scaling experiment sweeps
//!
//! Strong scaling first: one fixed matrix, task counts from 1 up to its
//! order, bounded by Amdahl's law. Weak scaling second: matrix order and task
//! count grow together, bounded by Gustafson's law using the code shares the
//! strong phase measured.

use crate::export::append_scaling_results;
use anyhow::{bail, Context, Result};
use laplace_det_core::{strong_scaling, weak_scaling, Matrix, ScalingConfig, ScalingResult};
use std::path::Path;

pub const STRONG_RESULTS_FILE: &str = "strong_scaling_results_rust.csv";
pub const WEAK_RESULTS_FILE: &str = "weak_scaling_results_rust.csv";

/// Parse a comma-separated list of matrix orders, e.g. "3,5,8"
pub fn parse_orders(orders: &str) -> Result<Vec<usize>> {
    let parsed = orders
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .with_context(|| format!("invalid matrix order '{}'", s))
        })
        .collect::<Result<Vec<usize>>>()?;

    if parsed.is_empty() {
        bail!("no matrix orders given");
    }
    if let Some(&zero) = parsed.iter().find(|&&n| n == 0) {
        bail!("matrix order must be at least 1, got {}", zero);
    }
    Ok(parsed)
}

fn load(config: &ScalingConfig, order: usize) -> laplace_det_core::Result<Matrix> {
    let matrix = config.load_matrix(order)?;
    println!(
        "Successfully loaded matrix of order {}. Calculating determinant(s)...",
        matrix.order()
    );
    Ok(matrix)
}

/// Run strong then weak scaling and write both result files
pub fn run_scaling_experiments(config: &ScalingConfig, export_dir: &Path) -> Result<()> {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Laplace Determinant - Scaling Experiments            ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Strong order: {}", config.strong_order);
    println!("Weak orders:  {:?}", config.weak_orders);
    println!(
        "Source:       {}",
        if config.synthetic {
            format!("synthetic (seed {})", config.seed)
        } else {
            config.matrix_dir.display().to_string()
        }
    );

    // Strong scaling: fixed n, vary tasks
    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Strong scaling: n={}, tasks 1..={}", config.strong_order, config.strong_order);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let matrix = load(config, config.strong_order).context("Strong scaling failed")?;
    let strong = strong_scaling(&matrix, matrix.order())?;
    println!(
        "Serial baseline: {:.3} ms, parallel share {:.4}, serial share {:.4}",
        strong.serial_exec_time_ms, strong.shares.parallel_share, strong.shares.serial_share
    );
    print_results_table(&strong.results, "amdahl");

    // Weak scaling: vary n, tasks = n
    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Weak scaling: tasks = n");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let weak = weak_scaling(&config.weak_orders, &strong.shares, |n| load(config, n))
        .context("Weak scaling failed")?;
    print_results_table(&weak, "gustafson");

    std::fs::create_dir_all(export_dir)
        .with_context(|| format!("Failed to create export directory {}", export_dir.display()))?;
    append_scaling_results(&export_dir.join(STRONG_RESULTS_FILE), &strong.results)?;
    append_scaling_results(&export_dir.join(WEAK_RESULTS_FILE), &weak)?;

    println!("\n✓ Results exported to: {}/", export_dir.display());
    Ok(())
}

fn print_results_table(results: &[ScalingResult], bound_label: &str) {
    println!("\n┌─────┬───────┬─────────────┬─────────────┬─────────┬───────────┐");
    println!("│  n  │ tasks │  serial(ms) │ parallel(ms)│ speedup │ {:>9} │", bound_label);
    println!("├─────┼───────┼─────────────┼─────────────┼─────────┼───────────┤");
    for r in results {
        println!(
            "│ {:>3} │ {:>5} │ {:>11.3} │ {:>11.3} │ {:>6.2}x │ {:>8.2}x │",
            r.matrix_order,
            r.parallel_tasks_num,
            r.serial_exec_time_ms,
            r.parallel_exec_time_ms,
            r.achieved_speedup,
            r.max_theoretical_speedup
        );
    }
    println!("└─────┴───────┴─────────────┴─────────────┴─────────┴───────────┘");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::SCALING_HEADER;
    use std::fs;

    #[test]
    fn test_parse_orders() {
        assert_eq!(parse_orders("3,5,8").unwrap(), vec![3, 5, 8]);
        assert_eq!(parse_orders(" 4 , 6 ,").unwrap(), vec![4, 6]);
        assert!(parse_orders("3,x").is_err());
        assert!(parse_orders("").is_err());
        assert!(parse_orders("2,0").is_err());
    }

    #[test]
    fn test_synthetic_experiments_write_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScalingConfig {
            strong_order: 4,
            weak_orders: vec![2, 3, 4],
            synthetic: true,
            ..ScalingConfig::default()
        };

        run_scaling_experiments(&config, dir.path()).unwrap();

        let strong = fs::read_to_string(dir.path().join(STRONG_RESULTS_FILE)).unwrap();
        let strong_lines: Vec<&str> = strong.lines().collect();
        assert_eq!(strong_lines[0], SCALING_HEADER);
        assert_eq!(strong_lines.len(), 1 + 4);
        assert!(strong_lines[1].starts_with("4,"));

        let weak = fs::read_to_string(dir.path().join(WEAK_RESULTS_FILE)).unwrap();
        let weak_lines: Vec<&str> = weak.lines().collect();
        assert_eq!(weak_lines.len(), 1 + 3);
        assert!(weak_lines[3].starts_with("4,"));
    }

    #[test]
    fn test_missing_matrix_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScalingConfig {
            matrix_dir: dir.path().join("nowhere"),
            strong_order: 3,
            ..ScalingConfig::default()
        };

        let err = run_scaling_experiments(&config, dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("matrica3x3.txt"));
    }
}
