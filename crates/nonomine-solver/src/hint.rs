//! Single-deduction hints for interactive play.

use log::debug;
use nonomine_core::{Board, Position};

use crate::{SolveState, StrategySolver, StrategyStep, Verdict};

/// Strategy label for hints that had to consult the ground truth.
pub const GOD_MODE: &str = "god mode";

/// Produces one explained deduction for the given board.
///
/// The full strategy stack is consulted in cheapest-first order and the
/// first step found is returned, so the hint is always one a player
/// could have deduced. When no strategy finds anything (or the board
/// state is contradictory, typically from a wrong flag), the fallback
/// peeks at the ground truth and points at a safe cell, labelled
/// [`GOD_MODE`] with no witnesses.
///
/// Returns `None` only when the board has no hidden unflagged cells
/// left to talk about.
///
/// # Examples
///
/// ```
/// use nonomine_core::{Board, Position};
/// use nonomine_solver::{Verdict, hint};
///
/// let mut board = Board::with_mines(3, 1, &[Position::new(1, 0)])?;
/// board.reveal(Position::new(0, 0));
///
/// let step = hint(&board).unwrap();
/// assert_eq!(step.cell(), Position::new(1, 0));
/// assert_eq!(step.verdict(), Verdict::Mine);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn hint(board: &Board) -> Option<StrategyStep> {
    let mut scratch = board.clone();
    let state = SolveState::new(&mut scratch);
    let solver = StrategySolver::with_all_strategies();
    match solver.find_step(&state) {
        Ok(Some(step)) => return Some(step),
        Ok(None) => {}
        Err(err) => debug!("hint fell back to ground truth: {err}"),
    }
    god_mode_hint(board)
}

/// Ground-truth fallback: the first hidden unflagged safe cell, or a
/// mine if only mines remain.
fn god_mode_hint(board: &Board) -> Option<StrategyStep> {
    let hidden: Vec<Position> = board
        .positions()
        .filter(|&pos| board.view(pos).is_hidden() && !board.is_flagged(pos))
        .collect();
    let safe = hidden.iter().copied().find(|&pos| !board.is_mine(pos));
    if let Some(cell) = safe {
        return Some(StrategyStep::new(GOD_MODE, cell, Verdict::Safe, Vec::new()));
    }
    hidden
        .first()
        .map(|&cell| StrategyStep::new(GOD_MODE, cell, Verdict::Mine, Vec::new()))
}
