use nonomine_core::Position;

use super::BoxedStrategy;
use crate::{
    InconsistencyReason, SolveState, SolverError, Strategy, StrategyStep, Verdict,
};

const NAME: &str = "tank enumeration";

/// Frontier regions larger than this are skipped; enumeration is
/// exponential in the region size.
pub const MAX_REGION_SIZE: usize = 15;

/// Bounded exhaustive enumeration over frontier regions.
///
/// Frontier cells are grouped into 8-connected regions. For each region
/// of at most [`MAX_REGION_SIZE`] cells, every mine/safe assignment is
/// enumerated recursively, pruning branches that violate a touching clue
/// or the global mine budget. A cell that is a mine in every surviving
/// assignment gets flagged; a cell that is a mine in none gets revealed.
///
/// This is the most expensive strategy in the stack and the only one
/// that is complete within its size bound, which is why the driver runs
/// it last.
#[derive(Debug, Default, Clone, Copy)]
pub struct TankEnumerator;

impl TankEnumerator {
    /// Creates a new `TankEnumerator` strategy.
    #[must_use]
    pub const fn new() -> Self {
        TankEnumerator
    }
}

/// A clue constraint projected onto one region.
struct RegionConstraint {
    clue: Position,
    remaining: usize,
    /// Indices into the region's cell list.
    inside: Vec<usize>,
    /// Hidden cells of the clue outside the region.
    outside: usize,
}

struct MineBudget {
    /// Mines that must land inside the region because the rest of the
    /// board cannot hold them all.
    min: usize,
    max: usize,
}

struct Enumeration {
    any_valid: bool,
    always_mine: u32,
    ever_mine: u32,
}

/// 8-connected groups of frontier cells, row-major within each group.
fn split_regions(frontier: &[Position]) -> Vec<Vec<Position>> {
    let mut regions = Vec::new();
    let mut assigned = vec![false; frontier.len()];
    for start in 0..frontier.len() {
        if assigned[start] {
            continue;
        }
        assigned[start] = true;
        let mut region = vec![frontier[start]];
        let mut cursor = 0;
        while cursor < region.len() {
            let current = region[cursor];
            cursor += 1;
            for (i, &candidate) in frontier.iter().enumerate() {
                if !assigned[i] && current.chebyshev_distance(candidate) == 1 {
                    assigned[i] = true;
                    region.push(candidate);
                }
            }
        }
        region.sort_by_key(|pos| (pos.y(), pos.x()));
        regions.push(region);
    }
    regions
}

fn project_constraints(
    state: &SolveState<'_>,
    region: &[Position],
) -> Result<Vec<RegionConstraint>, SolverError> {
    let mut projected = Vec::new();
    for pos in state.board().positions() {
        let Some(constraint) = state.constraint(pos)? else {
            continue;
        };
        let inside: Vec<usize> = constraint
            .hidden()
            .iter()
            .filter_map(|cell| region.iter().position(|r| r == cell))
            .collect();
        if inside.is_empty() {
            continue;
        }
        projected.push(RegionConstraint {
            clue: constraint.cell(),
            remaining: constraint.remaining(),
            outside: constraint.hidden().len() - inside.len(),
            inside,
        });
    }
    Ok(projected)
}

/// A partial assignment survives while every constraint can still be
/// met: assigned mines must not exceed `remaining`, and the unassigned
/// inside cells plus the outside cells must be able to cover the rest.
fn feasible(constraints: &[RegionConstraint], mask: u32, assigned: usize) -> bool {
    constraints.iter().all(|constraint| {
        let mut mines = 0;
        let mut unassigned = 0;
        for &i in &constraint.inside {
            if i >= assigned {
                unassigned += 1;
            } else if mask & (1 << i) != 0 {
                mines += 1;
            }
        }
        mines <= constraint.remaining
            && constraint.remaining <= mines + unassigned + constraint.outside
    })
}

fn enumerate(
    constraints: &[RegionConstraint],
    budget: &MineBudget,
    size: usize,
    assigned: usize,
    mask: u32,
    mines: usize,
    out: &mut Enumeration,
) {
    if mines > budget.max || !feasible(constraints, mask, assigned) {
        return;
    }
    if assigned == size {
        if mines < budget.min {
            return;
        }
        out.any_valid = true;
        out.always_mine &= mask;
        out.ever_mine |= mask;
        return;
    }
    enumerate(constraints, budget, size, assigned + 1, mask, mines, out);
    enumerate(
        constraints,
        budget,
        size,
        assigned + 1,
        mask | (1 << assigned),
        mines + 1,
        out,
    );
}

fn solve_region(
    state: &SolveState<'_>,
    region: &[Position],
) -> Result<Vec<(Position, Verdict, Position)>, SolverError> {
    let constraints = project_constraints(state, region)?;
    if constraints.is_empty() {
        return Ok(Vec::new());
    }
    let remaining = state.remaining_mines()?;
    let outside_board = state
        .board()
        .hidden_unflagged_count()
        .saturating_sub(region.len());
    let budget = MineBudget {
        min: remaining.saturating_sub(outside_board),
        max: remaining,
    };

    let mut out = Enumeration {
        any_valid: false,
        always_mine: u32::MAX,
        ever_mine: 0,
    };
    enumerate(&constraints, &budget, region.len(), 0, 0, 0, &mut out);
    if !out.any_valid {
        return Err(InconsistencyReason::UnsatisfiableClue(constraints[0].clue).into());
    }

    let mut deductions = Vec::new();
    for (i, &cell) in region.iter().enumerate() {
        let verdict = if out.always_mine & (1 << i) != 0 {
            Verdict::Mine
        } else if out.ever_mine & (1 << i) == 0 {
            Verdict::Safe
        } else {
            continue;
        };
        let witness = constraints
            .iter()
            .find(|c| c.inside.contains(&i))
            .map_or(constraints[0].clue, |c| c.clue);
        deductions.push((cell, verdict, witness));
    }
    Ok(deductions)
}

impl Strategy for TankEnumerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn find_step(&self, state: &SolveState<'_>) -> Result<Option<StrategyStep>, SolverError> {
        for region in split_regions(&state.frontier()) {
            if region.len() > MAX_REGION_SIZE {
                continue;
            }
            if let Some(&(cell, verdict, witness)) = solve_region(state, &region)?.first() {
                return Ok(Some(StrategyStep::new(NAME, cell, verdict, vec![witness])));
            }
        }
        Ok(None)
    }

    fn apply(&self, state: &mut SolveState<'_>) -> Result<bool, SolverError> {
        let mut progress = false;
        for region in split_regions(&state.frontier()) {
            if region.len() > MAX_REGION_SIZE {
                continue;
            }
            // An earlier region's deductions may have revealed or
            // flagged cells of this one.
            let region: Vec<Position> = region
                .into_iter()
                .filter(|&cell| {
                    state.board().view(cell).is_hidden() && !state.board().is_flagged(cell)
                })
                .collect();
            if region.is_empty() {
                continue;
            }
            for (cell, verdict, _) in solve_region(state, &region)? {
                if !state.board().view(cell).is_hidden() {
                    continue;
                }
                match verdict {
                    Verdict::Safe => state.reveal(cell)?,
                    Verdict::Mine => {
                        state.place_flag(cell);
                    }
                }
                progress = true;
            }
        }
        Ok(progress)
    }
}
