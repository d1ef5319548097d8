//! Shared frontier bookkeeping for the matrix and enumeration strategies.

use std::collections::HashMap;

use nonomine_core::Position;

use crate::{Constraint, SolveState, SolverError};

/// Frontier constraints grouped by constraint-sharing connectivity.
pub(super) struct Component {
    /// Hidden cells, in row-major order.
    pub(super) cells: Vec<Position>,
    pub(super) constraints: Vec<Constraint>,
}

/// Every live constraint on the board, in row-major clue order.
pub(super) fn collect_constraints(
    state: &SolveState<'_>,
) -> Result<Vec<Constraint>, SolverError> {
    let mut constraints = Vec::new();
    for pos in state.board().positions() {
        if let Some(constraint) = state.constraint(pos)? {
            constraints.push(constraint);
        }
    }
    Ok(constraints)
}

/// Splits constraints into connected components of their shared cells.
pub(super) fn split_components(constraints: Vec<Constraint>) -> Vec<Component> {
    let mut cell_to_constraints: HashMap<Position, Vec<usize>> = HashMap::new();
    for (i, constraint) in constraints.iter().enumerate() {
        for &cell in constraint.hidden() {
            cell_to_constraints.entry(cell).or_default().push(i);
        }
    }

    let mut visited = vec![false; constraints.len()];
    let mut components = Vec::new();
    for start in 0..constraints.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut member = vec![start];
        let mut stack = vec![start];
        while let Some(i) = stack.pop() {
            for &cell in constraints[i].hidden() {
                for &j in &cell_to_constraints[&cell] {
                    if !visited[j] {
                        visited[j] = true;
                        member.push(j);
                        stack.push(j);
                    }
                }
            }
        }

        let mut cells: Vec<Position> = member
            .iter()
            .flat_map(|&i| constraints[i].hidden().iter().copied())
            .collect();
        cells.sort_by_key(|pos| (pos.y(), pos.x()));
        cells.dedup();
        let component_constraints = member.iter().map(|&i| constraints[i].clone()).collect();
        components.push(Component {
            cells,
            constraints: component_constraints,
        });
    }
    components
}

#[cfg(test)]
mod tests {
    use nonomine_core::Position;

    use super::*;
    use crate::testing::SolveTester;

    #[test]
    fn test_distant_clues_form_separate_components() {
        let mut tester = SolveTester::from_layout(&["*....*", "......"])
            .reveal(Position::new(1, 0))
            .reveal(Position::new(4, 0));
        let state = tester.state();
        let components = split_components(collect_constraints(&state).unwrap());
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn test_shared_cell_merges_components() {
        let mut tester = SolveTester::from_layout(&["*.*", "..."])
            .reveal(Position::new(1, 0))
            .reveal(Position::new(1, 1));
        let state = tester.state();
        let components = split_components(collect_constraints(&state).unwrap());
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].constraints.len(), 2);
    }
}
