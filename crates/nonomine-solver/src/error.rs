//! Solver error types.

use derive_more::{Display, Error, From};
use nonomine_core::Position;

/// Errors reported by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum SolverError {
    /// The board cannot be satisfied given the current flags.
    ///
    /// At the top level this means the player placed a wrong flag. The
    /// contradiction strategy provokes this state on purpose while testing
    /// hypotheses and treats it as a successful deduction.
    #[display("board is inconsistent: {_0}")]
    Inconsistent(InconsistencyReason),
}

/// Why a board state is unsatisfiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InconsistencyReason {
    /// A clue has fewer hidden neighbors than remaining mines, or more
    /// adjacent flags than its value allows.
    #[display("clue at {_0} cannot be satisfied")]
    UnsatisfiableClue(#[error(not(source))] Position),
    /// A cell deduced safe turned out to be a mine.
    #[display("a mine was revealed at {_0}")]
    RevealedMine(#[error(not(source))] Position),
    /// More flags are placed than the board has mines.
    #[display("more flags are placed than the board has mines")]
    TooManyFlags,
}
