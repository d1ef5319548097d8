use std::collections::HashMap;

use nonomine_core::Position;

use super::{
    BoxedStrategy,
    frontier::{collect_constraints, split_components},
};
use crate::{
    Constraint, InconsistencyReason, SolveState, SolverError, Strategy, StrategyStep, Verdict,
};

const NAME: &str = "linear algebra";

/// A row value this close to its extremum pins every variable in the row.
///
/// All coefficients start as integers, so after elimination the entries
/// are exact dyadic rationals far coarser than this. The tolerance only
/// absorbs accumulated `f64` rounding noise.
pub const DEFINITE_TOLERANCE: f64 = 1e-3;

/// Components larger than this are solved through overlapping windows to
/// keep elimination cost bounded.
const WINDOW_SIZE: usize = 30;

/// Gaussian elimination over the frontier constraint system.
///
/// Each clue contributes the equation "sum of its hidden cells equals its
/// remaining count" with 0/1 variables. After reduction to row echelon
/// form, a row whose target sits at the minimum or maximum the left-hand
/// side can reach pins every variable in that row: coefficients pulling
/// toward the extremum are mines, the rest are safe.
///
/// The frontier is split into connected components first, and components
/// beyond [`WINDOW_SIZE`] cells are scanned with half-overlapping windows
/// so the matrices stay small.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearSolver;

impl LinearSolver {
    /// Creates a new `LinearSolver` strategy.
    #[must_use]
    pub const fn new() -> Self {
        LinearSolver
    }
}

/// Reduces the augmented matrix in place, pivoting on the largest
/// remaining absolute value in each column.
fn reduce(rows: &mut [Vec<f64>], vars: usize) {
    let mut pivot_row = 0;
    for col in 0..vars {
        if pivot_row == rows.len() {
            break;
        }
        let best = (pivot_row..rows.len())
            .max_by(|&a, &b| rows[a][col].abs().total_cmp(&rows[b][col].abs()));
        let Some(best) = best else {
            break;
        };
        if rows[best][col].abs() < DEFINITE_TOLERANCE {
            continue;
        }
        rows.swap(pivot_row, best);

        let pivot = rows[pivot_row][col];
        for value in &mut rows[pivot_row] {
            *value /= pivot;
        }
        for row in 0..rows.len() {
            if row == pivot_row {
                continue;
            }
            let factor = rows[row][col];
            if factor.abs() < DEFINITE_TOLERANCE {
                continue;
            }
            for c in 0..=vars {
                let delta = factor * rows[pivot_row][c];
                rows[row][c] -= delta;
            }
        }
        pivot_row += 1;
    }
}

enum RowReading {
    Nothing,
    Impossible,
    Definite(Vec<(usize, Verdict)>),
}

/// Reads a reduced row off against its extrema. With 0/1 variables the
/// left side ranges over [sum of negatives, sum of positives]; a target
/// at either end pins every variable.
fn read_row(row: &[f64], vars: usize) -> RowReading {
    let mut min_val = 0.0_f64;
    let mut max_val = 0.0_f64;
    let mut any = false;
    for &coefficient in &row[..vars] {
        if coefficient.abs() < DEFINITE_TOLERANCE {
            continue;
        }
        any = true;
        if coefficient < 0.0 {
            min_val += coefficient;
        } else {
            max_val += coefficient;
        }
    }
    let target = row[vars];
    if !any {
        if target.abs() < DEFINITE_TOLERANCE {
            return RowReading::Nothing;
        }
        return RowReading::Impossible;
    }
    if target < min_val - DEFINITE_TOLERANCE || target > max_val + DEFINITE_TOLERANCE {
        return RowReading::Impossible;
    }

    let at_minimum = (target - min_val).abs() < DEFINITE_TOLERANCE;
    let at_maximum = (target - max_val).abs() < DEFINITE_TOLERANCE;
    if !at_minimum && !at_maximum {
        return RowReading::Nothing;
    }
    let mut pinned = Vec::new();
    for (var, &coefficient) in row[..vars].iter().enumerate() {
        if coefficient.abs() < DEFINITE_TOLERANCE {
            continue;
        }
        let negative = coefficient < 0.0;
        // At the minimum the negative coefficients are saturated to 1;
        // at the maximum the positive ones are.
        let verdict = if at_minimum == negative {
            Verdict::Mine
        } else {
            Verdict::Safe
        };
        pinned.push((var, verdict));
    }
    RowReading::Definite(pinned)
}

/// Solves one window of a component, returning verdicts keyed by cell.
fn solve_window(
    cells: &[Position],
    constraints: &[Constraint],
    verdicts: &mut HashMap<Position, Verdict>,
) -> Result<(), SolverError> {
    let index: HashMap<Position, usize> =
        cells.iter().copied().enumerate().map(|(i, c)| (c, i)).collect();
    let rows: Vec<&Constraint> = constraints
        .iter()
        .filter(|c| c.hidden().iter().all(|cell| index.contains_key(cell)))
        .collect();
    if rows.is_empty() {
        return Ok(());
    }
    let vars = cells.len();

    let mut matrix: Vec<Vec<f64>> = rows
        .iter()
        .map(|constraint| {
            let mut row = vec![0.0; vars + 1];
            for cell in constraint.hidden() {
                row[index[cell]] = 1.0;
            }
            #[allow(clippy::cast_precision_loss)]
            {
                row[vars] = constraint.remaining() as f64;
            }
            row
        })
        .collect();
    reduce(&mut matrix, vars);

    for row in &matrix {
        match read_row(row, vars) {
            RowReading::Nothing => {}
            RowReading::Impossible => {
                return Err(InconsistencyReason::UnsatisfiableClue(rows[0].cell()).into());
            }
            RowReading::Definite(pinned) => {
                for (var, verdict) in pinned {
                    let cell = cells[var];
                    if let Some(&prior) = verdicts.get(&cell) {
                        if prior != verdict {
                            return Err(
                                InconsistencyReason::UnsatisfiableClue(rows[0].cell()).into()
                            );
                        }
                    }
                    verdicts.insert(cell, verdict);
                }
            }
        }
    }
    Ok(())
}

fn solve_frontier(state: &SolveState<'_>) -> Result<HashMap<Position, Verdict>, SolverError> {
    let mut verdicts = HashMap::new();
    for component in split_components(collect_constraints(state)?) {
        if component.cells.len() <= WINDOW_SIZE {
            solve_window(&component.cells, &component.constraints, &mut verdicts)?;
        } else {
            let mut start = 0;
            loop {
                let end = (start + WINDOW_SIZE).min(component.cells.len());
                solve_window(
                    &component.cells[start..end],
                    &component.constraints,
                    &mut verdicts,
                )?;
                if end == component.cells.len() {
                    break;
                }
                start += WINDOW_SIZE / 2;
            }
        }
    }
    Ok(verdicts)
}

impl Strategy for LinearSolver {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn find_step(&self, state: &SolveState<'_>) -> Result<Option<StrategyStep>, SolverError> {
        let verdicts = solve_frontier(state)?;
        let mut pinned: Vec<_> = verdicts.into_iter().collect();
        pinned.sort_by_key(|&(pos, _)| (pos.y(), pos.x()));
        let Some(&(cell, verdict)) = pinned.first() else {
            return Ok(None);
        };
        let witnesses = state
            .board()
            .neighbors(cell)
            .iter()
            .copied()
            .filter(|&n| state.board().revealed_clue(n).is_some())
            .collect();
        Ok(Some(StrategyStep::new(NAME, cell, verdict, witnesses)))
    }

    fn apply(&self, state: &mut SolveState<'_>) -> Result<bool, SolverError> {
        let verdicts = solve_frontier(state)?;
        if verdicts.is_empty() {
            return Ok(false);
        }
        let mut pinned: Vec<_> = verdicts.into_iter().collect();
        pinned.sort_by_key(|&(pos, _)| (pos.y(), pos.x()));
        for (cell, verdict) in pinned {
            // Earlier reveals may have flooded over this cell already.
            if !state.board().view(cell).is_hidden() {
                continue;
            }
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
    fn test_solves_one_two_one() {
        SolveTester::from_layout(&["...", "*.*", "..."])
            .reveal(Position::new(0, 0))
            .reveal(Position::new(1, 0))
            .reveal(Position::new(2, 0))
            .apply_once(&LinearSolver::new())
            .assert_flagged(Position::new(0, 1))
            .assert_flagged(Position::new(2, 1))
            .assert_revealed(Position::new(1, 1));
    }

    #[test]
    fn test_solves_one_two_two_one() {
        // 1-2-2-1 pins the two middle cells as mines and the ends safe.
        SolveTester::from_layout(&["....", ".**.", "...."])
            .reveal(Position::new(0, 0))
            .reveal(Position::new(1, 0))
            .reveal(Position::new(2, 0))
            .reveal(Position::new(3, 0))
            .apply_once(&LinearSolver::new())
            .assert_flagged(Position::new(1, 1))
            .assert_flagged(Position::new(2, 1))
            .assert_revealed(Position::new(0, 1))
            .assert_revealed(Position::new(3, 1));
    }

    #[test]
    fn test_no_deduction_on_fifty_fifty() {
        SolveTester::from_layout(&["*.", ".."])
            .reveal(Position::new(0, 1))
            .reveal(Position::new(1, 1))
            .apply_none(&LinearSolver::new());
    }

    #[test]
    fn test_impossible_system_is_inconsistent() {
        // A wrong flag on the shared middle cell leaves every clue
        // individually satisfiable but the system demanding 0 = 1.
        SolveTester::from_layout(&["...", "*.*"])
            .reveal(Position::new(0, 0))
            .reveal(Position::new(1, 0))
            .reveal(Position::new(2, 0))
            .flag(Position::new(1, 1))
            .apply_inconsistent(&LinearSolver::new());
    }

    #[test]
    fn test_row_reading_extrema() {
        // x0 - x1 = 1 pins x0 = 1 and x1 = 0.
        match read_row(&[1.0, -1.0, 1.0], 2) {
            RowReading::Definite(pinned) => {
                assert_eq!(pinned, [(0, Verdict::Mine), (1, Verdict::Safe)]);
            }
            _ => panic!("expected a definite row"),
        }
        // x0 + x1 = 1 pins nothing.
        assert!(matches!(read_row(&[1.0, 1.0, 1.0], 2), RowReading::Nothing));
        // 0 = 2 is impossible.
        assert!(matches!(
            read_row(&[0.0, 0.0, 2.0], 2),
            RowReading::Impossible
        ));
    }

    #[test]
    fn test_reduce_produces_identity_on_independent_rows() {
        let mut rows = vec![vec![1.0, 1.0, 1.0], vec![1.0, 0.0, 1.0]];
        reduce(&mut rows, 2);
        let solved: Vec<f64> = rows.iter().map(|row| row[2]).collect();
        assert!((solved[0] - 1.0).abs() < DEFINITE_TOLERANCE);
        assert!(solved[1].abs() < DEFINITE_TOLERANCE);
    }
}
