//! Generator error types.

use derive_more::{Display, Error};
use nonomine_core::Position;

/// Reasons a [`GenerateParams`](crate::GenerateParams) value is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ParamsError {
    /// Width or height is zero.
    #[display("board dimensions must be at least 1x1")]
    EmptyDimensions,
    /// The bomb count leaves no room for a safe 3x3 opening.
    #[display("{bomb_count} bombs do not fit: at most {capacity} leave a safe opening")]
    TooManyBombs {
        /// Requested number of bombs.
        bomb_count: usize,
        /// Largest bomb count the board can take, `W * H - 9`.
        capacity: usize,
    },
    /// The first click lies outside the board.
    #[display("first click {_0} is outside the board")]
    FirstClickOutOfBounds(#[error(not(source))] Position),
}

/// Error produced by board generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GeneratorError {
    /// The requested parameters are unusable.
    #[display("invalid parameters: {_0}")]
    InvalidParams(ParamsError),
    /// Cancellation was requested through the [`CancelToken`](crate::CancelToken).
    #[display("generation was cancelled")]
    Cancelled,
}

impl From<ParamsError> for GeneratorError {
    fn from(err: ParamsError) -> Self {
        Self::InvalidParams(err)
    }
}
