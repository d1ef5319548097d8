use super::BoxedStrategy;
use crate::{SolveState, SolverError, Strategy, StrategyStep, Verdict};

const NAME: &str = "global count";

/// The whole-board mine budget.
///
/// With `R` mines unflagged and `H` hidden unflagged cells anywhere on the
/// board, `R == 0` makes every hidden cell safe and `R == H` makes every
/// hidden cell a mine. Unlike the other strategies this one reaches cells
/// with no revealed neighbor at all, which is how isolated pockets get
/// closed out at the end of a game.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalCount;

impl GlobalCount {
    /// Creates a new `GlobalCount` strategy.
    #[must_use]
    pub const fn new() -> Self {
        GlobalCount
    }
}

fn verdict(state: &SolveState<'_>) -> Result<Option<Verdict>, SolverError> {
    let remaining = state.remaining_mines()?;
    let hidden = state.board().hidden_unflagged_count();
    if hidden == 0 {
        Ok(None)
    } else if remaining == 0 {
        Ok(Some(Verdict::Safe))
    } else if remaining == hidden {
        Ok(Some(Verdict::Mine))
    } else {
        Ok(None)
    }
}

impl Strategy for GlobalCount {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn find_step(&self, state: &SolveState<'_>) -> Result<Option<StrategyStep>, SolverError> {
        let Some(verdict) = verdict(state)? else {
            return Ok(None);
        };
        let board = state.board();
        let cell = board
            .positions()
            .find(|&pos| board.view(pos).is_hidden() && !board.is_flagged(pos));
        Ok(cell.map(|cell| StrategyStep::new(NAME, cell, verdict, Vec::new())))
    }

    fn apply(&self, state: &mut SolveState<'_>) -> Result<bool, SolverError> {
        let Some(verdict) = verdict(state)? else {
            return Ok(false);
        };
        let cells: Vec<_> = state
            .board()
            .positions()
            .filter(|&pos| state.board().view(pos).is_hidden() && !state.board().is_flagged(pos))
            .collect();
        for cell in cells {
            match verdict {
                Verdict::Safe => state.reveal(cell)?,
                Verdict::Mine => {
                    state.place_flag(cell);
                }
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use nonomine_core::Position;

    use super::*;
    use crate::testing::SolveTester;

    #[test]
    fn test_reveals_everything_once_all_mines_flagged() {
        SolveTester::from_layout(&["*..", "...", "..*"])
            .flag(Position::new(0, 0))
            .flag(Position::new(2, 2))
            .apply_once(&GlobalCount::new())
            .assert_revealed(Position::new(1, 1))
            .assert_revealed(Position::new(2, 0))
            .assert_revealed(Position::new(0, 2));
    }

    #[test]
    fn test_flags_everything_when_budget_fills_hidden() {
        // S3: 2×2 field with three mines; revealing the lone safe 3
        // leaves exactly as many hidden cells as unflagged mines.
        SolveTester::from_layout(&[".*", "**"])
            .reveal(Position::new(0, 0))
            .apply_once(&GlobalCount::new())
            .assert_flagged(Position::new(1, 0))
            .assert_flagged(Position::new(0, 1))
            .assert_flagged(Position::new(1, 1));
    }

    #[test]
    fn test_no_deduction_midgame() {
        SolveTester::from_layout(&["*..", "...", "..*"])
            .flag(Position::new(0, 0))
            .apply_none(&GlobalCount::new());
    }

    #[test]
    fn test_inconsistent_when_overflagged() {
        SolveTester::from_layout(&["*..", "...", "..."])
            .flag(Position::new(0, 0))
            .flag(Position::new(1, 0))
            .apply_inconsistent(&GlobalCount::new());
    }

    #[test]
    fn test_step_reaches_isolated_pockets() {
        // The hidden corner has no revealed neighbor, but the global
        // budget still proves it safe.
        let step = SolveTester::from_layout(&["*..", "...", "..."])
            .flag(Position::new(0, 0))
            .find_step(&GlobalCount::new())
            .expect("all mines are flagged");
        assert_eq!(step.strategy(), "global count");
        assert!(step.verdict().is_safe());
        assert!(step.witnesses().is_empty());
    }
}
