//! Oracle marking and simulated amplitude-amplification ranking.
//!
//! The structural filter (which digits are legal for a cell) plays the role
//! of the phase oracle; within the marked set, a classical simulation of
//! amplitude amplification biases selection toward the digit whose placement
//! collapses the candidate sets of related cells the most. Ranking only
//! affects search order, never correctness, so any backend implementing
//! [`CandidateRanker`] (including a real circuit execution service) can be
//! substituted at solver construction time.

use crate::grid::{CandidateSet, Grid, Position, BOX_SIZE, GRID_SIZE};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

// ---------------------------------------------------------------------------
// Weights and the oracle request shape
// ---------------------------------------------------------------------------

/// Normalized post-amplification selection weights over a cell's candidates.
///
/// Invariants: weights are non-negative, sum to 1 over a non-empty candidate
/// set (within floating-point tolerance), and every digit outside the
/// candidate set has weight 0. An empty candidate set yields an empty
/// mapping, which callers must treat as a contradiction signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeWeights {
    entries: Vec<(u8, f64)>,
}

impl AmplitudeWeights {
    /// The empty mapping (contradiction signal).
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn from_entries(entries: Vec<(u8, f64)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        Self { entries }
    }

    /// True if no candidate carries weight.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of weighted candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Weight of a digit; 0 for anything outside the candidate set.
    pub fn weight(&self, digit: u8) -> f64 {
        self.entries
            .iter()
            .find(|(d, _)| *d == digit)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// The highest-weight digit; ties broken by ascending digit.
    pub fn best(&self) -> Option<u8> {
        let mut best: Option<(u8, f64)> = None;
        for &(d, w) in &self.entries {
            match best {
                Some((_, bw)) if w <= bw => {}
                _ => best = Some((d, w)),
            }
        }
        best.map(|(d, _)| d)
    }

    /// Iterate `(digit, weight)` pairs in ascending digit order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.entries.iter().copied()
    }
}

/// The request handed to a ranking backend: one cell, its marked digits,
/// and the requested amplification iteration count.
///
/// Every structurally legal digit is marked; the oracle ranks, it does not
/// filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleSpec {
    /// The cell being ranked.
    pub pos: Position,
    /// Digits marked valid for the cell.
    pub marked: CandidateSet,
    /// Requested number of amplification iterations.
    pub iterations: u32,
}

impl OracleSpec {
    /// Build the oracle request for a cell of `grid`.
    pub fn for_cell(grid: &Grid, pos: Position, iterations: u32) -> Self {
        Self {
            pos,
            marked: grid.candidates(pos),
            iterations,
        }
    }

    /// Whether the oracle marks `digit` as valid for this cell.
    pub fn is_marked(&self, digit: u8) -> bool {
        self.marked.contains(digit)
    }
}

/// A candidate-ranking backend.
///
/// Implementations must be pure and deterministic given the grid: no state,
/// safe to call redundantly, safe to share across independent solver
/// instances.
pub trait CandidateRanker {
    /// Rank the candidates of the (empty) cell at `pos`.
    fn rank_candidates(&self, grid: &Grid, pos: Position) -> AmplitudeWeights;
}

// ---------------------------------------------------------------------------
// Classical amplitude-amplification simulation
// ---------------------------------------------------------------------------

/// Default ranking backend: classical simulation of amplitude amplification.
///
/// Each of the n marked digits starts at the uniform weight 1/n. The digits
/// whose tentative placement removes the most candidates from the other
/// empty cells of the same row, column, and box form the best-scoring set M
/// (the proxy for "how much the observation collapses related cells"). The
/// final weights follow the amplification probability
///
/// ```text
/// P(marked-best) = sin^2((2k + 1) * theta),   theta = asin(sqrt(m / n))
/// ```
///
/// spread uniformly over M, with the remainder spread over the rest. `k` is
/// the configured iteration count, capped at the optimal count
/// `round(pi/(4*theta) - 1/2)` so that extra iterations sharpen the ranking
/// monotonically instead of overshooting past the peak. `iterations = 0`
/// reproduces the uniform distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmplificationSim {
    /// Number of simulated amplification iterations.
    pub iterations: u32,
}

impl Default for AmplificationSim {
    fn default() -> Self {
        Self { iterations: 1 }
    }
}

impl AmplificationSim {
    /// Create a simulator with an explicit iteration count.
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }
}

impl CandidateRanker for AmplificationSim {
    fn rank_candidates(&self, grid: &Grid, pos: Position) -> AmplitudeWeights {
        let cands = grid.candidates(pos);
        if cands.is_empty() {
            return AmplitudeWeights::empty();
        }
        let n = cands.len();
        if n == 1 {
            let digit = cands.single().unwrap();
            return AmplitudeWeights::from_entries(vec![(digit, 1.0)]);
        }

        // Proxy score: total candidates left across the affected cells
        // after tentatively placing the digit. Lower collapses more.
        let peers = empty_peers(grid, pos);
        let mut scores: Vec<(u8, u32)> = Vec::with_capacity(n as usize);
        let mut scratch = grid.clone();
        for digit in cands.iter() {
            scratch.set(pos, digit);
            let score = peers
                .iter()
                .map(|&p| scratch.candidates(p).len())
                .sum::<u32>();
            scores.push((digit, score));
            scratch.clear(pos);
        }

        let best_score = scores.iter().map(|&(_, s)| s).min().unwrap();
        let marked_best: CandidateSet = scores
            .iter()
            .filter(|&&(_, s)| s == best_score)
            .map(|&(d, _)| d)
            .collect();
        let m = marked_best.len();

        let entries = if m == n {
            // No digit distinguishes itself; amplification is a no-op.
            let w = 1.0 / n as f64;
            cands.iter().map(|d| (d, w)).collect()
        } else {
            let theta = (m as f64 / n as f64).sqrt().asin();
            let optimal = ((FRAC_PI_4 / theta) - 0.5).round().max(1.0) as u32;
            let k = self.iterations.min(optimal);
            let p = (((2 * k + 1) as f64) * theta).sin().powi(2);
            let marked_w = p / m as f64;
            let rest_w = (1.0 - p) / (n - m) as f64;
            cands
                .iter()
                .map(|d| {
                    if marked_best.contains(d) {
                        (d, marked_w)
                    } else {
                        (d, rest_w)
                    }
                })
                .collect()
        };

        AmplitudeWeights::from_entries(entries)
    }
}

/// Rank a cell's candidates with the default simulation backend.
pub fn rank_candidates(grid: &Grid, pos: Position) -> AmplitudeWeights {
    AmplificationSim::default().rank_candidates(grid, pos)
}

/// Empty cells sharing a row, column, or box with `pos`, excluding `pos`.
fn empty_peers(grid: &Grid, pos: Position) -> Vec<Position> {
    let mut peers = Vec::with_capacity(20);
    for c in 0..GRID_SIZE {
        if c != pos.col {
            peers.push(Position::new(pos.row, c));
        }
    }
    for r in 0..GRID_SIZE {
        if r != pos.row {
            peers.push(Position::new(r, pos.col));
        }
    }
    let box_row = (pos.row / BOX_SIZE) * BOX_SIZE;
    let box_col = (pos.col / BOX_SIZE) * BOX_SIZE;
    for r in box_row..box_row + BOX_SIZE {
        for c in box_col..box_col + BOX_SIZE {
            if r != pos.row && c != pos.col {
                peers.push(Position::new(r, c));
            }
        }
    }
    peers.retain(|&p| grid.value(p).is_none());
    peers
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    /// Cell (0,0) has candidates {1,2,3}; column givens make 1 the unique
    /// most-collapsing digit (2 and 3 are each already excluded from three
    /// of the cell's empty peers).
    fn sharpening_grid() -> Grid {
        let mut rows = [[0u8; 9]; 9];
        rows[0] = [0, 4, 5, 6, 7, 8, 9, 0, 0];
        rows[8] = [0, 2, 3, 0, 0, 0, 0, 0, 0];
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_weights_normalized() {
        let grid = Grid::from_string(CLASSIC).unwrap();
        for pos in grid.empty_positions() {
            let weights = rank_candidates(&grid, pos);
            assert!(!weights.is_empty());
            assert!((weights.total() - 1.0).abs() < 1e-9, "at {}", pos);
            for (_, w) in weights.iter() {
                assert!(w >= 0.0);
            }
        }
    }

    #[test]
    fn test_zero_outside_candidate_set() {
        let grid = Grid::from_string(CLASSIC).unwrap();
        let pos = Position::new(0, 2);
        let cands = grid.candidates(pos);
        let weights = rank_candidates(&grid, pos);
        for d in 1..=9u8 {
            if !cands.contains(d) {
                assert_eq!(weights.weight(d), 0.0);
            }
        }
    }

    #[test]
    fn test_filled_cell_yields_empty_mapping() {
        let grid = Grid::from_string(CLASSIC).unwrap();
        let weights = rank_candidates(&grid, Position::new(0, 0));
        assert!(weights.is_empty());
        assert_eq!(weights.best(), None);
    }

    #[test]
    fn test_zero_iterations_is_uniform() {
        let grid = sharpening_grid();
        let weights =
            AmplificationSim::new(0).rank_candidates(&grid, Position::new(0, 0));
        assert_eq!(weights.len(), 3);
        for (_, w) in weights.iter() {
            assert!((w - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_amplification_sharpens_best() {
        let grid = sharpening_grid();
        let pos = Position::new(0, 0);
        let uniform = AmplificationSim::new(0).rank_candidates(&grid, pos);
        let amplified = AmplificationSim::new(1).rank_candidates(&grid, pos);

        assert_eq!(amplified.best(), Some(1));
        assert!(amplified.weight(1) > uniform.weight(1));
        // One iteration on a 1-of-3 marked set: sin^2(3*asin(1/sqrt(3))) = 25/27.
        assert!((amplified.weight(1) - 25.0 / 27.0).abs() < 1e-9);
        assert!((amplified.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_iterations_capped_at_optimal() {
        let grid = sharpening_grid();
        let pos = Position::new(0, 0);
        let at_optimal = AmplificationSim::new(1).rank_candidates(&grid, pos);
        let beyond = AmplificationSim::new(50).rank_candidates(&grid, pos);
        assert_eq!(at_optimal, beyond);
    }

    #[test]
    fn test_deterministic() {
        let grid = Grid::from_string(CLASSIC).unwrap();
        let pos = Position::new(4, 4);
        let a = rank_candidates(&grid, pos);
        let b = rank_candidates(&grid, pos);
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_candidate_gets_full_weight() {
        // Row 0 holds 2-9, so (0,0) has the lone candidate 1.
        let mut rows = [[0u8; 9]; 9];
        rows[0] = [0, 2, 3, 4, 5, 6, 7, 8, 9];
        let grid = Grid::from_rows(rows).unwrap();
        let weights = rank_candidates(&grid, Position::new(0, 0));
        assert_eq!(weights.best(), Some(1));
        assert_eq!(weights.weight(1), 1.0);
    }

    #[test]
    fn test_oracle_spec_marks_exactly_the_candidates() {
        let grid = Grid::from_string(CLASSIC).unwrap();
        let pos = Position::new(0, 2);
        let spec = OracleSpec::for_cell(&grid, pos, 1);
        assert_eq!(spec.marked, grid.candidates(pos));
        assert!(spec.is_marked(1));
        assert!(!spec.is_marked(5));
    }

    #[test]
    fn test_ties_break_ascending() {
        // An empty grid is fully symmetric: every digit scores the same,
        // so best() must fall back to the lowest digit.
        let grid = Grid::from_rows([[0u8; 9]; 9]).unwrap();
        let weights = rank_candidates(&grid, Position::new(0, 0));
        assert_eq!(weights.len(), 9);
        assert_eq!(weights.best(), Some(1));
    }
}
