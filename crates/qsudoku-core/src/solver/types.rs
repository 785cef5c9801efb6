use crate::grid::{CandidateSet, Position, GRID_SIZE};
use serde::{Deserialize, Serialize};

/// Configuration for the hybrid solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Simulated amplification iterations passed to the default ranking
    /// backend. Larger values sharpen the ranking toward the single most
    /// constraining digit; 0 disables amplification (uniform ranking).
    pub oracle_iterations: u32,
    /// Upper bound on selection/backtrack steps before the solver gives up
    /// with a budget error instead of looping on pathological inputs.
    pub max_steps: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            oracle_iterations: 1,
            max_steps: 1_000_000,
        }
    }
}

/// Counters accumulated over one solve call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveStats {
    /// Tentative assignments made in the Selecting state.
    pub decisions: u64,
    /// Decision frames undone in the Backtracking state.
    pub backtracks: u64,
    /// Cells filled by naked-single propagation.
    pub propagated_cells: u64,
    /// Selection plus backtrack steps counted against the budget.
    pub steps: u64,
}

/// A successful solve: the completed grid and the work it took.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// The completed, fully valid grid.
    pub grid: crate::grid::Grid,
    /// Search counters.
    pub stats: SolveStats,
}

/// Search states of the solver's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SolverState {
    Propagating,
    Selecting,
    Backtracking,
}

/// One tentative assignment plus everything needed to undo it: the digits
/// tried so far for the cell and a snapshot of every cell value before the
/// assignment, which also rolls back all propagation that followed it.
#[derive(Debug, Clone)]
pub(crate) struct DecisionFrame {
    pub pos: Position,
    pub chosen: u8,
    pub excluded: CandidateSet,
    pub snapshot: [[u8; GRID_SIZE]; GRID_SIZE],
}
