//! Command-line demo front-end: parse, solve, report.
//!
//! All solving and analysis lives in `qsudoku-core`; this binary only
//! orchestrates and formats.

use clap::{Parser, Subcommand};
use qsudoku_core::{
    analyze, required_qubit_count, ComplexityReport, Grid, HybridSolver,
    SearchSpaceDescriptor, SolverConfig, DEFAULT_QUBITS_PER_CELL,
};

/// The classic 30-given demonstration puzzle.
const DEMO_PUZZLE: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

#[derive(Parser)]
#[command(name = "qsudoku", version, about = "Hybrid quantum-inspired Sudoku solver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle and print the solution, search stats, and the
    /// quantum resource analysis for its search space
    Solve {
        /// 81-character puzzle string, row-major, 0 for empty cells
        /// (defaults to the bundled demo puzzle)
        puzzle: Option<String>,
        /// Simulated amplification iterations for candidate ranking
        #[arg(long, default_value_t = 1)]
        iterations: u32,
        /// Search step budget before giving up
        #[arg(long, default_value_t = 1_000_000)]
        max_steps: u64,
    },
    /// Print the quantum resource analysis for a hypothetical puzzle
    Analyze {
        /// Number of empty cells
        #[arg(long, default_value_t = 51)]
        empty_cells: u32,
        /// Assumed number of solutions
        #[arg(long, default_value_t = 1)]
        solutions: u64,
        /// Qubits used to encode one cell
        #[arg(long, default_value_t = DEFAULT_QUBITS_PER_CELL)]
        qubits_per_cell: u32,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> qsudoku_core::Result<()> {
    match cli.command {
        Command::Solve {
            puzzle,
            iterations,
            max_steps,
        } => {
            let grid = Grid::from_string(puzzle.as_deref().unwrap_or(DEMO_PUZZLE))?;
            println!(
                "Puzzle ({} givens, {} empty):\n",
                grid.given_count(),
                grid.empty_count()
            );
            println!("{}", grid);

            let solver = HybridSolver::with_config(SolverConfig {
                oracle_iterations: iterations,
                max_steps,
            });
            let solution = solver.solve(&grid)?;

            println!("Solution:\n");
            println!("{}", solution.grid);
            println!(
                "decisions: {}, backtracks: {}, propagated cells: {}",
                solution.stats.decisions,
                solution.stats.backtracks,
                solution.stats.propagated_cells
            );

            println!();
            let report = analyze(&SearchSpaceDescriptor::new(grid.empty_count() as u32))?;
            print_report(&report);
        }
        Command::Analyze {
            empty_cells,
            solutions,
            qubits_per_cell,
        } => {
            let descriptor =
                SearchSpaceDescriptor::new(empty_cells).with_solution_count(solutions);
            let mut report = analyze(&descriptor)?;
            report.required_qubit_count = required_qubit_count(empty_cells, qubits_per_cell);
            print_report(&report);
        }
    }
    Ok(())
}

fn print_report(report: &ComplexityReport) {
    println!("Quantum search requirements:");
    println!("  empty cells:              {}", report.empty_cell_count);
    println!("  search space size:        {}", report.search_space_size);
    println!(
        "  optimal Grover iterations: {}",
        report.optimal_grover_iterations
    );
    println!("  required qubits:          {}", report.required_qubit_count);
}
