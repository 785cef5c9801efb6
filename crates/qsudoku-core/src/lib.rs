//! Hybrid Sudoku engine blending constraint propagation with a
//! quantum-inspired candidate-ranking layer.
//!
//! The solver is classical and exhaustive: naked-single propagation plus
//! depth-first backtracking with full undo. What the "quantum" layer adds
//! is the *order* in which candidate digits are tried: a deterministic
//! classical simulation of amplitude amplification ranks each cell's
//! candidates by how strongly their placement collapses the candidate sets
//! of related cells. A real circuit-execution backend can be plugged in
//! behind the same [`CandidateRanker`] interface without affecting
//! correctness. The [`complexity`] module computes what a literal Grover
//! search over the same space would require.
//!
//! ```
//! use qsudoku_core::{Grid, HybridSolver};
//!
//! let grid = Grid::from_string(
//!     "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
//! )?;
//! let solution = HybridSolver::new().solve(&grid)?;
//! assert!(solution.grid.is_complete());
//! # Ok::<(), qsudoku_core::SudokuError>(())
//! ```

pub mod complexity;
mod error;
mod grid;
mod oracle;
mod propagate;
mod solver;

pub use complexity::{
    analyze, optimal_grover_iterations, required_qubit_count, search_space_size,
    ComplexityReport, SearchSpaceDescriptor, DEFAULT_QUBITS_PER_CELL,
};
pub use error::{Result, SudokuError};
pub use grid::{
    CandidateSet, Grid, Position, BOX_SIZE, BRANCHING_FACTOR, CELL_COUNT, GRID_SIZE,
};
pub use oracle::{
    rank_candidates, AmplificationSim, AmplitudeWeights, CandidateRanker, OracleSpec,
};
pub use propagate::{propagate, Contradiction};
pub use solver::{HybridSolver, Solution, SolveStats, SolverConfig};
