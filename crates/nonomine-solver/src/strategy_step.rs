//! Deduction steps produced by strategies.

use derive_more::IsVariant;
use nonomine_core::Position;

/// What a deduction says about a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Verdict {
    /// The cell is provably a mine and should be flagged.
    Mine,
    /// The cell is provably safe and can be revealed.
    Safe,
}

/// A single explained deduction.
///
/// Produced by [`Strategy::find_step`] and surfaced to users through
/// [`hint`]. The witnesses are the revealed clue cells whose constraints
/// justify the verdict; a hint UI highlights them before naming the
/// strategy.
///
/// [`Strategy::find_step`]: crate::strategy::Strategy::find_step
/// [`hint`]: crate::hint()
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyStep {
    strategy: &'static str,
    cell: Position,
    verdict: Verdict,
    witnesses: Vec<Position>,
}

impl StrategyStep {
    /// Creates a step.
    #[must_use]
    pub fn new(
        strategy: &'static str,
        cell: Position,
        verdict: Verdict,
        witnesses: Vec<Position>,
    ) -> Self {
        Self {
            strategy,
            cell,
            verdict,
            witnesses,
        }
    }

    /// Returns the name of the strategy that produced this step.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        self.strategy
    }

    /// Returns the implicated cell.
    #[must_use]
    pub fn cell(&self) -> Position {
        self.cell
    }

    /// Returns whether the cell is a mine or safe.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Returns the clue cells that justify the deduction.
    #[must_use]
    pub fn witnesses(&self) -> &[Position] {
        &self.witnesses
    }
}
