//! Error types for board construction and snapshot restoration.

use derive_more::{Display, Error};

use crate::Position;

/// Errors reported when constructing a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Width or height is zero.
    #[display("board dimensions must be at least 1×1")]
    EmptyDimensions,
    /// A mine position lies outside the board.
    #[display("mine position {_0} is out of bounds")]
    OutOfBounds(#[error(not(source))] Position),
    /// The same mine position was given twice.
    #[display("duplicate mine position {_0}")]
    DuplicateMine(#[error(not(source))] Position),
}

/// Errors reported when restoring a board from a [`BoardSnapshot`].
///
/// [`BoardSnapshot`]: crate::BoardSnapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SnapshotError {
    /// The snapshot's mine positions are invalid.
    #[display("invalid mine layout: {_0}")]
    Board(BoardError),
    /// `bomb_count` does not match the number of mine positions.
    #[display("bomb count {bomb_count} does not match {mine_positions} mine positions")]
    BombCountMismatch {
        /// The recorded bomb count.
        bomb_count: usize,
        /// The number of recorded mine positions.
        mine_positions: usize,
    },
}

impl From<BoardError> for SnapshotError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}
