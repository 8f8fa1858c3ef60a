//! Laplace Determinant CLI
//!
//! Serial vs parallel cofactor-expansion determinants and scaling experiments.
//!
//! # Usage
//! ```bash
//! # Serial and parallel run per matrix, rows appended to results.csv
//! laplace-det run test_data/matrica8x8.txt test_data/matrica9x9.txt results.csv
//!
//! # Strong then weak scaling (Amdahl / Gustafson)
//! laplace-det scaling --matrix-dir test_data --export results/
//!
//! # Same experiments on seeded random matrices
//! laplace-det scaling --synthetic --strong-order 9 --weak-orders 3,5,7,9
//!
//! # Produce a test matrix file
//! laplace-det generate --order 10 --output test_data/matrica10x10.txt
//! ```

mod export;
mod run;
mod sweep;

use anyhow::Result;
use clap::{Parser, Subcommand};
use laplace_det_core::ScalingConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "laplace-det")]
#[command(about = "Laplace-expansion determinants for Amdahl/Gustafson scaling experiments")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Do not install a log subscriber
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute determinants serially and in parallel, appending timings to a CSV
    Run {
        /// Matrix files followed by the results CSV
        #[arg(required = true, num_args = 2.., value_name = "PATH")]
        paths: Vec<PathBuf>,
    },

    /// Run strong then weak scaling experiments
    Scaling {
        /// Directory holding matrica{n}x{n}.txt files
        #[arg(long, default_value = "test_data")]
        matrix_dir: PathBuf,

        /// Order of the strong scaling matrix
        #[arg(long, default_value = "10")]
        strong_order: usize,

        /// Weak scaling orders (comma-separated)
        #[arg(long, default_value = "3,5,8,9,10,11")]
        weak_orders: String,

        /// Export directory for CSV files
        #[arg(long, default_value = "results")]
        export: PathBuf,

        /// Use seeded random matrices instead of files
        #[arg(long)]
        synthetic: bool,

        /// Seed for synthetic matrices
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Entry bound for synthetic matrices
        #[arg(long, default_value = "100")]
        bound: i32,
    },

    /// Write a random matrix file
    Generate {
        /// Matrix order
        #[arg(long)]
        order: usize,

        /// Output file
        #[arg(long)]
        output: PathBuf,

        /// Entries are integers in [-bound, bound]
        #[arg(long, default_value = "100")]
        bound: i32,

        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Run { paths } => run::run_matrices(&paths),
        Commands::Scaling {
            matrix_dir,
            strong_order,
            weak_orders,
            export,
            synthetic,
            seed,
            bound,
        } => {
            let config = ScalingConfig {
                matrix_dir,
                strong_order,
                weak_orders: sweep::parse_orders(&weak_orders)?,
                synthetic,
                seed,
                bound,
            };
            sweep::run_scaling_experiments(&config, &export)
        }
        Commands::Generate {
            order,
            output,
            bound,
            seed,
        } => run::generate_matrix(order, bound, seed, &output),
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_requires_results_path() {
        assert!(Cli::try_parse_from(["laplace-det", "run", "m.txt"]).is_err());
        let cli = Cli::try_parse_from(["laplace-det", "run", "a.txt", "b.txt", "out.csv"]).unwrap();
        match cli.command {
            Commands::Run { paths } => assert_eq!(paths.len(), 3),
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_scaling_defaults() {
        let cli = Cli::try_parse_from(["laplace-det", "-vv", "scaling"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Scaling {
                strong_order,
                weak_orders,
                synthetic,
                ..
            } => {
                assert_eq!(strong_order, 10);
                assert_eq!(weak_orders, "3,5,8,9,10,11");
                assert!(!synthetic);
            }
            _ => panic!("expected scaling command"),
        }
    }
}
