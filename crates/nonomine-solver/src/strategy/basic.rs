use super::BoxedStrategy;
use crate::{SolveState, SolverError, Strategy, StrategyStep, Verdict};

const NAME: &str = "basic rules";

/// Local arithmetic on a single clue.
///
/// For a clue with remaining value `r` and hidden unflagged neighbor set
/// `H`: if `r == 0` every cell of `H` is safe, and if `r == |H|` every cell
/// of `H` is a mine. This is the workhorse strategy; it is the only one
/// driven by the dirty set, so a pass touches just the clues whose
/// neighborhood changed since the last pass.
///
/// # Examples
///
/// ```
/// use nonomine_core::{Board, Position};
/// use nonomine_solver::{SolveState, Strategy as _, strategy::BasicRules};
///
/// // 1 *  the revealed 1 forces the flag.
/// let mut board = Board::with_mines(2, 1, &[Position::new(1, 0)])?;
/// board.reveal(Position::new(0, 0));
///
/// let mut state = SolveState::new(&mut board);
/// assert!(BasicRules::new().apply(&mut state)?);
/// assert!(board.is_flagged(Position::new(1, 0)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicRules;

impl BasicRules {
    /// Creates a new `BasicRules` strategy.
    #[must_use]
    pub const fn new() -> Self {
        BasicRules
    }
}

impl Strategy for BasicRules {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn find_step(&self, state: &SolveState<'_>) -> Result<Option<StrategyStep>, SolverError> {
        for pos in state.board().positions() {
            let Some(constraint) = state.constraint(pos)? else {
                continue;
            };
            if constraint.remaining() == 0 {
                return Ok(Some(StrategyStep::new(
                    NAME,
                    constraint.hidden()[0],
                    Verdict::Safe,
                    vec![pos],
                )));
            }
            if constraint.remaining() == constraint.hidden().len() {
                return Ok(Some(StrategyStep::new(
                    NAME,
                    constraint.hidden()[0],
                    Verdict::Mine,
                    vec![pos],
                )));
            }
        }
        Ok(None)
    }

    fn apply(&self, state: &mut SolveState<'_>) -> Result<bool, SolverError> {
        let dirty = state.take_dirty();
        let mut progress = false;

        for &pos in &dirty {
            let Some(constraint) = state.constraint(pos)? else {
                continue;
            };
            if constraint.remaining() == 0 {
                for &cell in constraint.hidden() {
                    state.reveal(cell)?;
                }
                progress = true;
            } else if constraint.remaining() == constraint.hidden().len() {
                for &cell in constraint.hidden() {
                    state.place_flag(cell);
                }
                progress = true;
            }
        }

        if !progress {
            state.restore_dirty(&dirty);
        }
        Ok(progress)
    }
}
