//! Naked-single constraint propagation.
//!
//! Intentionally limited to naked singles: the ranking and backtracking
//! layers resolve everything the fixpoint leaves behind, which keeps this
//! step independently testable.

use crate::grid::{Grid, Position};

/// Contradiction signal: a still-empty cell has no legal candidate.
///
/// Recovered locally by the solver's backtracking; only surfaced as
/// [`crate::SudokuError::Unsolvable`] once the decision stack is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction {
    /// The cell whose candidate set became empty.
    pub pos: Position,
}

/// Run naked-single propagation to a fixpoint.
///
/// Repeats full passes over the grid until a pass changes nothing: any
/// empty cell with exactly one candidate is assigned that candidate. An
/// empty cell with no candidates aborts with a [`Contradiction`].
///
/// Returns whether any cell was filled. Calling again with no intervening
/// mutation returns `Ok(false)`.
pub fn propagate(grid: &mut Grid) -> Result<bool, Contradiction> {
    let mut changed = false;
    loop {
        let mut pass_changed = false;
        for pos in grid.empty_positions() {
            let cands = grid.candidates(pos);
            if cands.is_empty() {
                return Err(Contradiction { pos });
            }
            if let Some(value) = cands.single() {
                grid.set(pos, value);
                log::trace!("propagation fills {} = {}", pos, value);
                pass_changed = true;
            }
        }
        if !pass_changed {
            break;
        }
        changed = true;
    }
    Ok(changed)
}
