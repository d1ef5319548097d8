use derive_more::IsVariant;
use log::debug;
use nonomine_core::Board;

use crate::{
    SolveState, SolverError, StrategyStep,
    strategy::{self, BoxedStrategy},
};

/// The result of running the strategy stack to a fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum SolveOutcome {
    /// Every safe cell is revealed or every mine is flagged.
    Solved,
    /// No strategy can make further progress.
    Stuck,
}

/// Statistics collected while solving.
///
/// Tracks how often each strategy was applied, in solver order, plus the
/// total number of steps taken.
///
/// # Examples
///
/// ```
/// use nonomine_core::{Board, Position};
/// use nonomine_solver::StrategySolver;
///
/// let solver = StrategySolver::with_all_strategies();
/// let mut board = Board::with_mines(3, 1, &[Position::new(1, 0)])?;
/// board.reveal(Position::new(0, 0));
///
/// let (_outcome, stats) = solver.solve(&mut board)?;
/// println!("total steps: {}", stats.total_steps());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct SolverStats {
    applications: Vec<usize>,
    total_steps: usize,
}

impl SolverStats {
    /// Returns strategy application counts in solver order.
    ///
    /// Strategies that never fired have a count of `0`.
    #[must_use]
    pub fn applications(&self) -> &[usize] {
        &self.applications
    }

    /// Returns the total number of solving steps taken.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Returns `true` if any strategy was applied at least once.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.total_steps > 0
    }
}

/// A solver that applies logical deduction strategies to a board.
///
/// Strategies are tried in order, cheapest first. As soon as one makes
/// progress the pass restarts from the top, so the cheap local rules get
/// to exploit whatever the expensive strategies uncovered. The solver
/// only reveals cells and places flags; it never consults the ground
/// truth under hidden cells.
///
/// # Examples
///
/// ```
/// use nonomine_core::{Board, Position};
/// use nonomine_solver::StrategySolver;
///
/// let solver = StrategySolver::with_all_strategies();
/// let mut board = Board::with_mines(3, 1, &[Position::new(1, 0)])?;
/// board.reveal(Position::new(0, 0));
///
/// let (outcome, _stats) = solver.solve(&mut board)?;
/// assert!(outcome.is_solved());
/// assert!(board.is_flagged(Position::new(1, 0)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct StrategySolver {
    strategies: Vec<BoxedStrategy>,
}

impl Default for StrategySolver {
    fn default() -> Self {
        Self::with_all_strategies()
    }
}

impl StrategySolver {
    /// Creates a solver with the given strategies, applied in order.
    #[must_use]
    pub fn new(strategies: Vec<BoxedStrategy>) -> Self {
        Self { strategies }
    }

    /// Creates a solver with the full strategy stack, cheapest first.
    #[must_use]
    pub fn with_all_strategies() -> Self {
        Self {
            strategies: strategy::all_strategies(),
        }
    }

    /// Creates a statistics object aligned with this solver's strategy
    /// order.
    #[must_use]
    pub fn new_stats(&self) -> SolverStats {
        SolverStats {
            applications: vec![0; self.strategies.len()],
            total_steps: 0,
        }
    }

    /// Returns the configured strategies in application order.
    ///
    /// The returned slice defines the index mapping used by
    /// [`SolverStats::applications`].
    #[must_use]
    pub fn strategies(&self) -> &[BoxedStrategy] {
        &self.strategies
    }

    /// Applies one step by trying each strategy in order.
    ///
    /// Returns `Ok(true)` when some strategy made progress and
    /// `Ok(false)` when the solver is stuck.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] when the clues, flags, and
    /// mine count cannot all be satisfied.
    pub fn step(
        &self,
        state: &mut SolveState<'_>,
        stats: &mut SolverStats,
    ) -> Result<bool, SolverError> {
        debug_assert_eq!(self.strategies.len(), stats.applications.len());

        for (i, strategy) in self.strategies.iter().enumerate() {
            if strategy.apply(state)? {
                debug!("applied {}", strategy.name());
                stats.applications[i] += 1;
                stats.total_steps += 1;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Finds the next deduction without mutating the board.
    ///
    /// Returns `Ok(None)` when no strategy can produce a step.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] when the board is
    /// inconsistent.
    pub fn find_step(
        &self,
        state: &SolveState<'_>,
    ) -> Result<Option<StrategyStep>, SolverError> {
        for strategy in &self.strategies {
            if let Some(step) = strategy.find_step(state)? {
                return Ok(Some(step));
            }
        }
        Ok(None)
    }

    /// Solves the board as far as deduction allows.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] when the board state is
    /// contradictory.
    pub fn solve(&self, board: &mut Board) -> Result<(SolveOutcome, SolverStats), SolverError> {
        let mut stats = self.new_stats();
        let outcome = self.solve_with_stats(board, &mut stats)?;
        Ok((outcome, stats))
    }

    /// Like [`solve`](Self::solve), but accumulates into an existing
    /// statistics object.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] when the board state is
    /// contradictory.
    pub fn solve_with_stats(
        &self,
        board: &mut Board,
        stats: &mut SolverStats,
    ) -> Result<SolveOutcome, SolverError> {
        let mut state = SolveState::new(board);
        while self.step(&mut state, stats)? {}
        // Flagging the last mine drops the remaining count to zero, at
        // which point the global count rule reveals the leftover safe
        // cells before the loop runs out of progress.
        let outcome = if state.is_resolved() {
            SolveOutcome::Solved
        } else {
            SolveOutcome::Stuck
        };
        debug!("stopped {outcome:?} after {} steps", stats.total_steps);
        Ok(outcome)
    }
}
