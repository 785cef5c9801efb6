//! Hybrid solver: propagation, oracle-ranked selection, backtracking.
//!
//! A state machine over three search states (Propagating, Selecting,
//! Backtracking) with terminal outcomes Solved and Unsolvable. The ranking
//! backend only decides the *order* in which digits are tried; correctness
//! comes from exhaustive depth-first search with full undo.

mod types;

use crate::error::{Result, SudokuError};
use crate::grid::{CandidateSet, Grid, Position};
use crate::oracle::{AmplificationSim, AmplitudeWeights, CandidateRanker};
use crate::propagate::propagate;

pub use types::{Solution, SolveStats, SolverConfig};

use types::{DecisionFrame, SolverState};

/// Hybrid constraint-propagation / amplitude-ranked backtracking solver.
///
/// Each solve call works on its own clone of the input grid; a solver
/// instance carries no per-puzzle state and can be reused.
pub struct HybridSolver {
    config: SolverConfig,
    ranker: Box<dyn CandidateRanker>,
}

impl Default for HybridSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl HybridSolver {
    /// Create a solver with the default configuration and the built-in
    /// amplification simulation as ranking backend.
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    /// Create a solver with a custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            ranker: Box::new(AmplificationSim::new(config.oracle_iterations)),
            config,
        }
    }

    /// Create a solver with an externally supplied ranking backend, e.g. a
    /// quantum-execution service. The backend must be pure and
    /// deterministic given the grid; it cannot affect correctness, only
    /// search order.
    pub fn with_ranker(config: SolverConfig, ranker: Box<dyn CandidateRanker>) -> Self {
        Self { config, ranker }
    }

    /// Solve the puzzle, returning the completed grid and search counters.
    ///
    /// Fails with [`SudokuError::Unsolvable`] when the search space is
    /// exhausted and with [`SudokuError::BudgetExceeded`] when the
    /// configured step budget runs out first.
    pub fn solve(&self, grid: &Grid) -> Result<Solution> {
        let mut working = grid.clone();
        let mut stats = SolveStats::default();
        let mut stack: Vec<DecisionFrame> = Vec::new();
        // After a backtrack, the popped frame's cell is re-selected with its
        // exclusion set instead of running cell selection again.
        let mut retry: Option<(Position, CandidateSet)> = None;
        let mut state = SolverState::Propagating;

        loop {
            match state {
                SolverState::Propagating => {
                    let before = working.empty_count() as u64;
                    let outcome = propagate(&mut working);
                    stats.propagated_cells += before - working.empty_count() as u64;
                    match outcome {
                        Ok(_) => {
                            if working.is_complete() {
                                if !working.is_fully_valid() {
                                    return Err(SudokuError::InternalInvariant(
                                        "completed grid failed validity verification",
                                    ));
                                }
                                log::debug!(
                                    "solved: {} decisions, {} backtracks, {} propagated",
                                    stats.decisions,
                                    stats.backtracks,
                                    stats.propagated_cells
                                );
                                return Ok(Solution {
                                    grid: working,
                                    stats,
                                });
                            }
                            state = SolverState::Selecting;
                        }
                        Err(contradiction) => {
                            log::trace!("contradiction at {}", contradiction.pos);
                            state = SolverState::Backtracking;
                        }
                    }
                }

                SolverState::Selecting => {
                    self.charge_step(&mut stats)?;
                    let (pos, excluded) = match retry.take() {
                        Some(target) => target,
                        None => match select_mrv_cell(&working) {
                            Some(pos) => (pos, CandidateSet::empty()),
                            None => {
                                return Err(SudokuError::InternalInvariant(
                                    "no empty cell although the grid is incomplete",
                                ));
                            }
                        },
                    };

                    let weights = self.ranker.rank_candidates(&working, pos);
                    match best_allowed(&weights, excluded) {
                        Some(digit) => {
                            stack.push(DecisionFrame {
                                pos,
                                chosen: digit,
                                excluded,
                                snapshot: working.cell_array(),
                            });
                            working.set(pos, digit);
                            stats.decisions += 1;
                            log::trace!("decision {}: {} = {}", stack.len(), pos, digit);
                            state = SolverState::Propagating;
                        }
                        None => {
                            // Candidates exhausted for this cell.
                            state = SolverState::Backtracking;
                        }
                    }
                }

                SolverState::Backtracking => {
                    self.charge_step(&mut stats)?;
                    let frame = match stack.pop() {
                        Some(frame) => frame,
                        None => return Err(SudokuError::Unsolvable),
                    };
                    working.restore_cells(frame.snapshot);
                    let mut excluded = frame.excluded;
                    excluded.insert(frame.chosen);
                    retry = Some((frame.pos, excluded));
                    stats.backtracks += 1;
                    log::trace!("backtrack {}: undo {} = {}", stats.backtracks, frame.pos, frame.chosen);
                    state = SolverState::Selecting;
                }
            }
        }
    }

    fn charge_step(&self, stats: &mut SolveStats) -> Result<()> {
        stats.steps += 1;
        if stats.steps > self.config.max_steps {
            return Err(SudokuError::BudgetExceeded { steps: stats.steps });
        }
        Ok(())
    }
}

/// The empty cell with the fewest candidates; ties go to the lowest row,
/// then the lowest column.
fn select_mrv_cell(grid: &Grid) -> Option<Position> {
    let mut best: Option<(u32, Position)> = None;
    for pos in grid.empty_positions() {
        let count = grid.candidates(pos).len();
        match best {
            Some((best_count, _)) if count >= best_count => {}
            _ => best = Some((count, pos)),
        }
    }
    best.map(|(_, pos)| pos)
}

/// The highest-weight digit not yet excluded; ties go to the lowest digit.
fn best_allowed(weights: &AmplitudeWeights, excluded: CandidateSet) -> Option<u8> {
    let mut best: Option<(u8, f64)> = None;
    for (digit, weight) in weights.iter() {
        if excluded.contains(digit) {
            continue;
        }
        match best {
            Some((_, best_weight)) if weight <= best_weight => {}
            _ => best = Some((digit, weight)),
        }
    }
    best.map(|(digit, _)| digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const CLASSIC_SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn test_solve_classic() {
        let grid = Grid::from_string(CLASSIC).unwrap();
        let solver = HybridSolver::new();
        let solution = solver.solve(&grid).unwrap();

        assert!(solution.grid.is_complete());
        assert!(solution.grid.is_fully_valid());
        // The classic demo puzzle has a unique completion.
        assert_eq!(solution.grid.to_line(), CLASSIC_SOLUTION);
    }

    #[test]
    fn test_solve_hard_puzzle_backtracks() {
        // Arto Inkala's puzzle: propagation alone gets nowhere, so this
        // exercises thousands of decision/backtrack steps.
        let puzzle =
            "800000000003600000070090200050007000000045700000100030001000068008500010090000400";
        let grid = Grid::from_string(puzzle).unwrap();
        let solver = HybridSolver::new();
        let solution = solver.solve(&grid).unwrap();

        assert!(solution.grid.is_complete());
        assert!(solution.grid.is_fully_valid());
        assert_eq!(
            solution.grid.to_line(),
            "812753649943682175675491283154237896369845721287169534521974368438526917796318452"
        );
        assert!(solution.stats.backtracks > 0);
    }

    #[test]
    fn test_deterministic() {
        let grid = Grid::from_string(CLASSIC).unwrap();
        let solver = HybridSolver::new();
        let a = solver.solve(&grid).unwrap();
        let b = solver.solve(&grid).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_unsolvable_by_propagation() {
        // Row 0 forces (0,0) = 1 but column 0 already holds a 1: the very
        // first propagation pass hits a contradiction with no frame to pop.
        let mut rows = [[0u8; 9]; 9];
        rows[0] = [0, 2, 3, 4, 5, 6, 7, 8, 9];
        rows[3][0] = 1;
        let grid = Grid::from_rows(rows).unwrap();

        let solver = HybridSolver::new();
        assert_eq!(solver.solve(&grid), Err(SudokuError::Unsolvable));
    }

    #[test]
    fn test_unsolvable_after_backtracking() {
        // (0,0), (0,1), (0,2) must hold {1,2,3}, but the 3 given in their
        // box leaves each of them only {1,2}: three cells, two digits.
        // Propagation alone cannot see this; the solver has to try both
        // digits for (0,0) and exhaust them.
        let mut rows = [[0u8; 9]; 9];
        rows[0] = [0, 0, 0, 4, 5, 6, 7, 8, 9];
        rows[2][2] = 3;
        let grid = Grid::from_rows(rows).unwrap();

        let solver = HybridSolver::new();
        assert_eq!(solver.solve(&grid), Err(SudokuError::Unsolvable));
    }

    #[test]
    fn test_budget_exceeded_is_distinct() {
        // The empty grid is trivially satisfiable but needs far more than
        // three selection steps.
        let grid = Grid::from_rows([[0u8; 9]; 9]).unwrap();
        let solver = HybridSolver::with_config(SolverConfig {
            max_steps: 3,
            ..SolverConfig::default()
        });

        match solver.solve(&grid) {
            Err(SudokuError::BudgetExceeded { steps }) => assert!(steps > 3),
            other => panic!("expected budget error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_grid_solves_within_default_budget() {
        let grid = Grid::from_rows([[0u8; 9]; 9]).unwrap();
        let solver = HybridSolver::new();
        let solution = solver.solve(&grid).unwrap();
        assert!(solution.grid.is_complete());
        assert!(solution.grid.is_fully_valid());
    }

    #[test]
    fn test_already_complete_input() {
        let grid = Grid::from_string(CLASSIC_SOLUTION).unwrap();
        let solver = HybridSolver::new();
        let solution = solver.solve(&grid).unwrap();
        assert_eq!(solution.grid, grid);
        assert_eq!(solution.stats.decisions, 0);
        assert_eq!(solution.stats.backtracks, 0);
    }

    #[test]
    fn test_input_grid_is_not_mutated() {
        let grid = Grid::from_string(CLASSIC).unwrap();
        let solver = HybridSolver::new();
        solver.solve(&grid).unwrap();
        assert_eq!(grid.to_line(), CLASSIC);
    }

    #[test]
    fn test_propagation_alone_solves_easy_remainder() {
        // Remove a single cell from a solved grid: one naked single, no
        // decisions needed.
        let mut s = String::from(CLASSIC_SOLUTION);
        s.replace_range(40..41, "0");
        let grid = Grid::from_string(&s).unwrap();
        let solver = HybridSolver::new();
        let solution = solver.solve(&grid).unwrap();
        assert_eq!(solution.grid.to_line(), CLASSIC_SOLUTION);
        assert_eq!(solution.stats.decisions, 0);
        assert_eq!(solution.stats.propagated_cells, 1);
    }

    /// Ranking quality must not affect correctness: a backend that ranks
    /// uniformly (no amplification at all) still reaches the unique solution.
    struct UniformRanker;

    impl CandidateRanker for UniformRanker {
        fn rank_candidates(&self, grid: &Grid, pos: Position) -> AmplitudeWeights {
            AmplificationSim::new(0).rank_candidates(grid, pos)
        }
    }

    #[test]
    fn test_correct_regardless_of_ranking() {
        let grid = Grid::from_string(CLASSIC).unwrap();
        let solver =
            HybridSolver::with_ranker(SolverConfig::default(), Box::new(UniformRanker));
        let solution = solver.solve(&grid).unwrap();
        assert_eq!(solution.grid.to_line(), CLASSIC_SOLUTION);
    }
}
