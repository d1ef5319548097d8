//! Persisted board record.

use serde::{Deserialize, Serialize};

use crate::{Board, Position, SnapshotError};

/// The persisted form of a board: dimensions plus the mine layout.
///
/// This is the only record the toolkit persists (for replays). The
/// `mine_positions` field is written in row-major order but treated as an
/// unordered set; duplicates are rejected when the board is restored. The
/// view and flag overlays are not part of the record.
///
/// # Examples
///
/// ```
/// use nonomine_core::{Board, BoardSnapshot, Position};
///
/// let board = Board::with_mines(4, 4, &[Position::new(2, 1)])?;
/// let snapshot = board.snapshot();
/// let restored = Board::try_from(&snapshot)?;
/// assert_eq!(restored.bomb_count(), 1);
/// assert!(restored.is_mine(Position::new(2, 1)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Board width.
    pub width: u16,
    /// Board height.
    pub height: u16,
    /// Total number of mines; must match `mine_positions.len()`.
    pub bomb_count: usize,
    /// Mine coordinates, recorded in row-major order.
    pub mine_positions: Vec<Position>,
}

impl Board {
    /// Captures the persisted record of this board.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        let mine_positions: Vec<Position> =
            self.positions().filter(|&pos| self.is_mine(pos)).collect();
        BoardSnapshot {
            width: self.width(),
            height: self.height(),
            bomb_count: mine_positions.len(),
            mine_positions,
        }
    }
}

impl TryFrom<&BoardSnapshot> for Board {
    type Error = SnapshotError;

    /// Restores a fully hidden board from a snapshot.
    fn try_from(snapshot: &BoardSnapshot) -> Result<Self, Self::Error> {
        if snapshot.bomb_count != snapshot.mine_positions.len() {
            return Err(SnapshotError::BombCountMismatch {
                bomb_count: snapshot.bomb_count,
                mine_positions: snapshot.mine_positions.len(),
            });
        }
        let board = Self::with_mines(snapshot.width, snapshot.height, &snapshot.mine_positions)?;
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardError;

    #[test]
    fn test_snapshot_round_trip() {
        let mines = [Position::new(0, 0), Position::new(4, 2), Position::new(1, 3)];
        let board = Board::with_mines(5, 4, &mines).unwrap();
        let snapshot = board.snapshot();
        assert_eq!(snapshot.bomb_count, 3);

        let restored = Board::try_from(&snapshot).unwrap();
        for pos in board.positions() {
            assert_eq!(board.is_mine(pos), restored.is_mine(pos));
            assert_eq!(board.clue(pos), restored.clue(pos));
        }
    }

    #[test]
    fn test_rejects_bomb_count_mismatch() {
        let snapshot = BoardSnapshot {
            width: 3,
            height: 3,
            bomb_count: 2,
            mine_positions: vec![Position::new(0, 0)],
        };
        assert_eq!(
            Board::try_from(&snapshot).unwrap_err(),
            SnapshotError::BombCountMismatch {
                bomb_count: 2,
                mine_positions: 1,
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_positions() {
        let dup = Position::new(1, 1);
        let snapshot = BoardSnapshot {
            width: 3,
            height: 3,
            bomb_count: 2,
            mine_positions: vec![dup, dup],
        };
        assert_eq!(
            Board::try_from(&snapshot).unwrap_err(),
            SnapshotError::Board(BoardError::DuplicateMine(dup))
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let board = Board::with_mines(3, 2, &[Position::new(2, 1)]).unwrap();
        let snapshot = board.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: BoardSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
