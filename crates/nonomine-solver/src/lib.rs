//! Logical Minesweeper solver.
//!
//! This crate deduces which hidden cells of a partially revealed board are
//! provably mines or provably safe, using only information a human player
//! would have. Deductions are organized as [`Strategy`] implementations that
//! a [`StrategySolver`] applies in a fixed cheapest-first order:
//!
//! 1. [`BasicRules`]: local arithmetic on a single clue
//! 2. [`SubsetRule`]: pairwise constraint containment
//! 3. [`GlobalCount`]: the remaining global mine total
//! 4. [`Contradiction`]: per-cell hypothesis testing
//! 5. [`LinearSolver`]: row reduction of the 0/1 constraint system
//! 6. [`TankEnumerator`]: bounded configuration enumeration
//!
//! After any strategy makes progress the solver restarts from the top so the
//! cheap strategies can exploit the new information; a dirty set of changed
//! cells keeps the re-scans incremental.
//!
//! Revealing cells consults the board's ground truth (that is how the game
//! itself works), so driving a fully hidden board from a first click is the
//! same thing as simulating a perfect-deduction play, which is exactly what
//! the no-guess board generator does with this crate.
//!
//! [`Strategy`]: strategy::Strategy
//! [`BasicRules`]: strategy::BasicRules
//! [`SubsetRule`]: strategy::SubsetRule
//! [`GlobalCount`]: strategy::GlobalCount
//! [`Contradiction`]: strategy::Contradiction
//! [`LinearSolver`]: strategy::LinearSolver
//! [`TankEnumerator`]: strategy::TankEnumerator
//!
//! # Examples
//!
//! ```
//! use nonomine_core::{Board, Position};
//! use nonomine_solver::{SolveOutcome, StrategySolver};
//!
//! // 3×1 board with a mine in the middle: 1 * 1
//! let mut board = Board::with_mines(3, 1, &[Position::new(1, 0)])?;
//! board.reveal(Position::new(0, 0));
//!
//! let solver = StrategySolver::with_all_strategies();
//! let (outcome, stats) = solver.solve(&mut board)?;
//! assert_eq!(outcome, SolveOutcome::Solved);
//! assert!(stats.has_progress());
//! assert!(board.is_flagged(Position::new(1, 0)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    error::*,
    hint::*,
    state::*,
    strategy::{BoxedStrategy, Strategy},
    strategy_solver::*,
    strategy_step::*,
};

mod error;
mod hint;
mod state;
pub mod strategy;
mod strategy_solver;
mod strategy_step;

#[cfg(test)]
mod testing;
