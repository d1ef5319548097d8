//! Deduction strategies.
//!
//! Each strategy implements the [`Strategy`] trait and operates on a
//! [`SolveState`]. [`all_strategies`] returns the full stack in the order
//! the driver applies it.

use std::fmt::Debug;

pub use self::{
    basic::BasicRules,
    contradiction::Contradiction,
    global_count::GlobalCount,
    linear::{DEFINITE_TOLERANCE, LinearSolver},
    subset::SubsetRule,
    tank::{MAX_REGION_SIZE, TankEnumerator},
};
use crate::{SolveState, SolverError, StrategyStep};

mod basic;
mod contradiction;
mod frontier;
mod global_count;
mod linear;
mod subset;
mod tank;

/// Returns the full strategy stack, cheapest first.
///
/// The order is part of the public contract: the driver applies strategies
/// in exactly this priority and restarts from the top after any progress,
/// and hints report the first strategy that fires.
///
/// # Examples
///
/// ```
/// use nonomine_solver::strategy;
///
/// let strategies = strategy::all_strategies();
/// assert_eq!(strategies.len(), 6);
/// assert_eq!(strategies[0].name(), "basic rules");
/// ```
#[must_use]
pub fn all_strategies() -> Vec<BoxedStrategy> {
    let mut strategies = arithmetic_strategies();
    strategies.push(Box::new(Contradiction::new()));
    strategies.push(Box::new(LinearSolver::new()));
    strategies.push(Box::new(TankEnumerator::new()));
    strategies
}

/// Returns only the cheap arithmetic strategies: basic rules, subset logic
/// and the global mine count.
///
/// These resolve the bulk of ordinary play on their own; the remaining
/// strategies exist for the constraint tangles arithmetic cannot untie.
#[must_use]
pub fn arithmetic_strategies() -> Vec<BoxedStrategy> {
    vec![
        Box::new(BasicRules::new()),
        Box::new(SubsetRule::new()),
        Box::new(GlobalCount::new()),
    ]
}

/// A Minesweeper deduction strategy.
///
/// Strategies are stateless; all session data lives in the [`SolveState`].
pub trait Strategy: Debug + Send + Sync {
    /// Returns the name of the strategy, as shown in hint explanations.
    fn name(&self) -> &'static str;

    /// Returns a boxed clone of the strategy.
    fn clone_box(&self) -> BoxedStrategy;

    /// Finds the first deduction this strategy can make, without mutating
    /// the state.
    ///
    /// Returns `Ok(None)` when the strategy has nothing to contribute.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the board state is
    /// unsatisfiable.
    fn find_step(&self, state: &SolveState<'_>) -> Result<Option<StrategyStep>, SolverError>;

    /// Applies the strategy, flagging and revealing every cell it can
    /// decide in one pass.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - at least one cell was flagged or revealed
    /// * `Ok(false)` - no progress was possible
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the board state is
    /// unsatisfiable.
    fn apply(&self, state: &mut SolveState<'_>) -> Result<bool, SolverError>;
}

/// A boxed strategy.
pub type BoxedStrategy = Box<dyn Strategy>;

impl Clone for BoxedStrategy {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
