use std::collections::HashMap;

use nonomine_core::{Board, Position};

use super::BoxedStrategy;
use crate::{
    InconsistencyReason, SolveState, SolverError, Strategy, StrategyStep, Verdict,
};

const NAME: &str = "contradiction";

/// Propagation is bounded; an exhausted budget counts as "no
/// contradiction", never as a deduction.
const MAX_PROPAGATION_ROUNDS: usize = 20;

/// Single-cell hypothesis testing.
///
/// For each frontier cell the strategy assumes "this is a mine" and runs
/// local clue arithmetic on a scratch overlay of the board. If the
/// assumption forces some clue below zero or above its hidden capacity,
/// the cell is proven safe. The symmetric "this is safe" assumption
/// proves mines. Hypotheses are never nested, so this sits between the
/// pairwise subset rule and full enumeration in both power and cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct Contradiction;

impl Contradiction {
    /// Creates a new `Contradiction` strategy.
    #[must_use]
    pub const fn new() -> Self {
        Contradiction
    }
}

fn clue_neighbors(board: &Board, pos: Position) -> Vec<Position> {
    board
        .neighbors(pos)
        .iter()
        .copied()
        .filter(|&n| board.revealed_clue(n).is_some())
        .collect()
}

/// Assumes `cell` is a mine (or safe) and propagates clue arithmetic on
/// an overlay. Returns the first clue that becomes unsatisfiable, or
/// `None` when the hypothesis survives the propagation budget.
fn hypothesis_fails(state: &SolveState<'_>, cell: Position, mine: bool) -> Option<Position> {
    let board = state.board();
    // true = assumed mine, false = assumed safe.
    let mut assumed: HashMap<Position, bool> = HashMap::new();
    assumed.insert(cell, mine);
    let mut queue = clue_neighbors(board, cell);

    for _ in 0..MAX_PROPAGATION_ROUNDS {
        let mut next = Vec::new();
        let mut changed = false;

        for &clue_pos in &queue {
            let Some(clue) = board.revealed_clue(clue_pos) else {
                continue;
            };
            let mut remaining = i32::from(clue);
            let mut hidden = Vec::new();
            for &n in board.neighbors(clue_pos) {
                if board.is_flagged(n) || assumed.get(&n) == Some(&true) {
                    remaining -= 1;
                } else if board.view(n).is_hidden() && assumed.get(&n) != Some(&false) {
                    hidden.push(n);
                }
            }
            let Ok(remaining) = usize::try_from(remaining) else {
                return Some(clue_pos);
            };
            if remaining > hidden.len() {
                return Some(clue_pos);
            }
            if hidden.is_empty() {
                continue;
            }
            if remaining == 0 {
                for n in hidden {
                    assumed.insert(n, false);
                    next.extend(clue_neighbors(board, n));
                }
                changed = true;
            } else if remaining == hidden.len() {
                for n in hidden {
                    assumed.insert(n, true);
                    next.extend(clue_neighbors(board, n));
                }
                changed = true;
            }
        }

        if !changed {
            break;
        }
        queue = next;
    }
    None
}

fn prove(
    state: &SolveState<'_>,
    cell: Position,
) -> Result<Option<(Verdict, Position)>, SolverError> {
    if let Some(witness) = hypothesis_fails(state, cell, true) {
        // Both hypotheses failing means the board itself is broken.
        if hypothesis_fails(state, cell, false).is_some() {
            return Err(InconsistencyReason::UnsatisfiableClue(witness).into());
        }
        return Ok(Some((Verdict::Safe, witness)));
    }
    if let Some(witness) = hypothesis_fails(state, cell, false) {
        return Ok(Some((Verdict::Mine, witness)));
    }
    Ok(None)
}

impl Strategy for Contradiction {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn find_step(&self, state: &SolveState<'_>) -> Result<Option<StrategyStep>, SolverError> {
        for cell in state.frontier() {
            if let Some((verdict, witness)) = prove(state, cell)? {
                return Ok(Some(StrategyStep::new(NAME, cell, verdict, vec![witness])));
            }
        }
        Ok(None)
    }

    fn apply(&self, state: &mut SolveState<'_>) -> Result<bool, SolverError> {
        // One proven cell per pass; the cheap strategies get another
        // look before the next hypothesis is tried.
        for cell in state.frontier() {
            match prove(state, cell)? {
                Some((Verdict::Safe, _)) => {
                    state.reveal(cell)?;
                    return Ok(true);
                }
                Some((Verdict::Mine, _)) => {
                    state.place_flag(cell);
                    return Ok(true);
                }
                None => {}
            }
        }
        Ok(false)
    }
}
