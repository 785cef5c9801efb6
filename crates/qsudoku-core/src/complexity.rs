//! Theoretical resource requirements of a full quantum search.
//!
//! Pure functions over a search-space descriptor: raw search-space size,
//! the optimal Grover iteration count floor(pi/4 * sqrt(N/M)), and qubit
//! requirements for a binary encoding of the empty cells. These feed
//! reporting only and are never called from the solver's search loop.
//!
//! Search-space sizes are exact: 9^81 far exceeds any native integer
//! width, and reported counts must not be silently approximated.

use crate::error::{Result, SudokuError};
use crate::grid::BRANCHING_FACTOR;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Qubits needed to encode one cell's digit 1-9 in binary (2^4 = 16 > 9).
pub const DEFAULT_QUBITS_PER_CELL: u32 = 4;

/// pi/4 as a fixed-point fraction with 16 decimal digits.
const PI_OVER_4_NUM: u64 = 7_853_981_633_974_483;
const PI_OVER_4_DEN: u64 = 10_000_000_000_000_000;

/// Parameters of a quantum search over a partially filled grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSpaceDescriptor {
    /// Number of empty cells.
    pub empty_cell_count: u32,
    /// Values per empty cell; 9 for standard Sudoku.
    pub branching_factor: u32,
    /// Number of complete assignments satisfying all constraints. Must be
    /// at least 1.
    pub solution_count: u64,
}

impl SearchSpaceDescriptor {
    /// Descriptor for a standard puzzle with `empty_cell_count` empty cells
    /// and a single solution.
    pub fn new(empty_cell_count: u32) -> Self {
        Self {
            empty_cell_count,
            branching_factor: BRANCHING_FACTOR,
            solution_count: 1,
        }
    }

    /// Override the assumed solution count.
    pub fn with_solution_count(mut self, solution_count: u64) -> Self {
        self.solution_count = solution_count;
        self
    }
}

/// Structured resource summary for external formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityReport {
    pub empty_cell_count: u32,
    pub search_space_size: BigUint,
    pub optimal_grover_iterations: BigUint,
    pub required_qubit_count: u64,
}

/// Size of the raw assignment space for `empty_cell_count` empty cells:
/// 9^empty_cell_count, exact.
pub fn search_space_size(empty_cell_count: u32) -> BigUint {
    BigUint::from(BRANCHING_FACTOR).pow(empty_cell_count)
}

/// Optimal number of Grover iterations for a search space of size
/// `search_space_size` containing `solution_count` solutions:
/// floor(pi/4 * sqrt(N/M)).
///
/// Fails with [`SudokuError::InvalidArgument`] if `solution_count` is zero.
pub fn optimal_grover_iterations(
    search_space_size: &BigUint,
    solution_count: u64,
) -> Result<BigUint> {
    if solution_count == 0 {
        return Err(SudokuError::invalid_argument(
            "solution count must be at least 1",
        ));
    }
    let ratio = search_space_size / solution_count;
    Ok(ratio.sqrt() * PI_OVER_4_NUM / PI_OVER_4_DEN)
}

/// Qubits required to encode `empty_cell_count` cells at `qubits_per_cell`
/// qubits each.
pub fn required_qubit_count(empty_cell_count: u32, qubits_per_cell: u32) -> u64 {
    u64::from(empty_cell_count) * u64::from(qubits_per_cell)
}

/// Compute the full resource report for a search-space descriptor.
pub fn analyze(descriptor: &SearchSpaceDescriptor) -> Result<ComplexityReport> {
    let search_space =
        BigUint::from(descriptor.branching_factor).pow(descriptor.empty_cell_count);
    let iterations = optimal_grover_iterations(&search_space, descriptor.solution_count)?;
    Ok(ComplexityReport {
        empty_cell_count: descriptor.empty_cell_count,
        search_space_size: search_space,
        optimal_grover_iterations: iterations,
        required_qubit_count: required_qubit_count(
            descriptor.empty_cell_count,
            DEFAULT_QUBITS_PER_CELL,
        ),
    })
}
