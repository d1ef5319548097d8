use nonomine_core::Position;

use super::BoxedStrategy;
use crate::{
    Constraint, InconsistencyReason, SolveState, SolverError, Strategy, StrategyStep, Verdict,
};

const NAME: &str = "subset rule";

/// Pairwise subset inference between nearby clues.
///
/// When the hidden neighbor set of clue `A` is contained in that of clue
/// `B`, the difference `B ∖ A` carries exactly `r_B − r_A` mines. If that
/// count is zero every cell of the difference is safe, and if it equals
/// the size of the difference every cell is a mine.
///
/// Two clues can only share hidden neighbors when they sit within
/// Chebyshev distance 2 of each other, so the pair scan stays local.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubsetRule;

impl SubsetRule {
    /// Creates a new `SubsetRule` strategy.
    #[must_use]
    pub const fn new() -> Self {
        SubsetRule
    }
}

fn is_subset(inner: &[Position], outer: &[Position]) -> bool {
    inner.iter().all(|cell| outer.contains(cell))
}

/// Clue cells within Chebyshev distance 2 of `pos`, excluding `pos` itself.
fn nearby_clues(state: &SolveState<'_>, pos: Position) -> Vec<Position> {
    let board = state.board();
    let x0 = pos.x().saturating_sub(2);
    let y0 = pos.y().saturating_sub(2);
    let x1 = (pos.x() + 2).min(usize::from(board.width()) - 1);
    let y1 = (pos.y() + 2).min(usize::from(board.height()) - 1);

    let mut clues = Vec::new();
    for y in y0..=y1 {
        for x in x0..=x1 {
            if x == pos.x() && y == pos.y() {
                continue;
            }
            let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
                continue;
            };
            let other = Position::new(x, y);
            if board.revealed_clue(other).is_some() {
                clues.push(other);
            }
        }
    }
    clues
}

/// The deduction a subset pair yields, if any.
///
/// A contained clue demanding more mines than its container allows is
/// unsatisfiable, so that pair is an error rather than a skip.
fn pair_deduction(
    inner: &Constraint,
    outer: &Constraint,
) -> Result<Option<(Verdict, Vec<Position>)>, SolverError> {
    if !is_subset(inner.hidden(), outer.hidden()) {
        return Ok(None);
    }
    let Some(extra) = outer.remaining().checked_sub(inner.remaining()) else {
        return Err(SolverError::Inconsistent(
            InconsistencyReason::UnsatisfiableClue(outer.cell()),
        ));
    };
    let difference: Vec<Position> = outer
        .hidden()
        .iter()
        .copied()
        .filter(|cell| !inner.hidden().contains(cell))
        .collect();
    if difference.is_empty() {
        return Ok(None);
    }
    let verdict = if extra == 0 {
        Some((Verdict::Safe, difference))
    } else if extra == difference.len() {
        Some((Verdict::Mine, difference))
    } else {
        None
    };
    Ok(verdict)
}

impl Strategy for SubsetRule {
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
            for other in nearby_clues(state, pos) {
                let Some(other_constraint) = state.constraint(other)? else {
                    continue;
                };
                for (inner, outer, inner_pos, outer_pos) in [
                    (&constraint, &other_constraint, pos, other),
                    (&other_constraint, &constraint, other, pos),
                ] {
                    if let Some((verdict, cells)) = pair_deduction(inner, outer)? {
                        return Ok(Some(StrategyStep::new(
                            NAME,
                            cells[0],
                            verdict,
                            vec![inner_pos, outer_pos],
                        )));
                    }
                }
            }
        }
        Ok(None)
    }

    fn apply(&self, state: &mut SolveState<'_>) -> Result<bool, SolverError> {
        // Read the dirty set without draining it; the basic rules own it.
        let dirty = state.dirty_cells().to_vec();
        let mut progress = false;

        for pos in dirty {
            // The empty constraint is a subset of every clue, so a
            // remaining of zero or of the full hidden set decides the
            // clue by itself.
            if let Some(constraint) = state.constraint(pos)? {
                if constraint.remaining() == 0 {
                    for &cell in constraint.hidden() {
                        state.reveal(cell)?;
                    }
                    progress = true;
                    continue;
                }
                if constraint.remaining() == constraint.hidden().len() {
                    for &cell in constraint.hidden() {
                        state.place_flag(cell);
                    }
                    progress = true;
                    continue;
                }
            }
            for other in nearby_clues(state, pos) {
                // Re-fetch each iteration: earlier deductions may have
                // shrunk or resolved either constraint.
                let Some(constraint) = state.constraint(pos)? else {
                    break;
                };
                let Some(other_constraint) = state.constraint(other)? else {
                    continue;
                };
                for (inner, outer) in [
                    (&constraint, &other_constraint),
                    (&other_constraint, &constraint),
                ] {
                    if let Some((verdict, cells)) = pair_deduction(inner, outer)? {
                        match verdict {
                            Verdict::Safe => {
                                for cell in cells {
                                    state.reveal(cell)?;
                                }
                            }
                            Verdict::Mine => {
                                for cell in cells {
                                    state.place_flag(cell);
                                }
                            }
                        }
                        progress = true;
                        break;
                    }
                }
            }
        }

        Ok(progress)
    }
}
