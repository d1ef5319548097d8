//! The Minesweeper board.

use std::fmt::{self, Display};

use crate::{BoardError, CellView, NeighborCache, Position};

/// Outcome of revealing a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reveal {
    /// The cells newly revealed by the flood fill, in reveal order.
    ///
    /// Empty when the target cell was already revealed or flagged.
    Revealed(Vec<Position>),
    /// The target cell was a mine; its view is now [`CellView::Exploded`].
    Exploded,
}

/// A Minesweeper board: ground truth plus the player-visible overlays.
///
/// Ground truth (`mine` and `clue` per cell) is fixed when the board is
/// constructed. The view and flag overlays are mutated through [`reveal`]
/// and [`set_flag`] as the game is played or simulated. The board owns its
/// [`NeighborCache`], built once for its dimensions.
///
/// Invariants maintained by construction:
///
/// - every non-mine cell's clue equals the number of mines among its
///   8-neighbors;
/// - a cell shows `Revealed(k)` only if it is not a mine and its clue is `k`;
/// - a flag can only sit on a hidden cell;
/// - [`bomb_count`] equals the number of mine cells.
///
/// [`reveal`]: Self::reveal
/// [`set_flag`]: Self::set_flag
/// [`bomb_count`]: Self::bomb_count
///
/// # Examples
///
/// ```
/// use nonomine_core::{Board, Position};
///
/// let board = Board::with_mines(4, 4, &[Position::new(0, 0), Position::new(3, 3)])?;
/// assert_eq!(board.bomb_count(), 2);
/// assert_eq!(board.clue(Position::new(1, 1)), 1);
/// assert_eq!(board.clue(Position::new(2, 2)), 1);
/// assert_eq!(board.clue(Position::new(2, 1)), 0);
/// # Ok::<(), nonomine_core::BoardError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    width: u16,
    height: u16,
    bomb_count: usize,
    flags_placed: usize,
    mines: Vec<bool>,
    clues: Vec<u8>,
    views: Vec<CellView>,
    flags: Vec<bool>,
    neighbors: NeighborCache,
}

impl Board {
    /// Creates a fully hidden board with the given mine layout and computes
    /// all clue numbers.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyDimensions`] if `width` or `height` is
    /// zero, [`BoardError::OutOfBounds`] for a mine outside the board, and
    /// [`BoardError::DuplicateMine`] when a position appears twice.
    pub fn with_mines(width: u16, height: u16, mines: &[Position]) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::EmptyDimensions);
        }

        let cell_count = usize::from(width) * usize::from(height);
        let neighbors = NeighborCache::new(width, height);
        let mut mine_grid = vec![false; cell_count];
        for &pos in mines {
            if pos.x() >= usize::from(width) || pos.y() >= usize::from(height) {
                return Err(BoardError::OutOfBounds(pos));
            }
            let idx = pos.y() * usize::from(width) + pos.x();
            if mine_grid[idx] {
                return Err(BoardError::DuplicateMine(pos));
            }
            mine_grid[idx] = true;
        }

        let mut board = Self {
            width,
            height,
            bomb_count: mines.len(),
            flags_placed: 0,
            mines: mine_grid,
            clues: vec![0; cell_count],
            views: vec![CellView::Hidden; cell_count],
            flags: vec![false; cell_count],
            neighbors,
        };
        board.compute_clues();
        Ok(board)
    }

    fn compute_clues(&mut self) {
        for pos in self.positions() {
            if self.is_mine(pos) {
                continue;
            }
            let count = self
                .neighbors
                .neighbors(pos)
                .iter()
                .filter(|&&n| self.is_mine(n))
                .count();
            let idx = self.index(pos);
            #[expect(clippy::cast_possible_truncation)]
            {
                self.clues[idx] = count as u8;
            }
        }
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        debug_assert!(self.in_bounds(pos));
        pos.y() * usize::from(self.width) + pos.x()
    }

    /// Returns the board width.
    #[must_use]
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Returns the board height.
    #[must_use]
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Returns the total number of mines.
    #[must_use]
    #[inline]
    pub const fn bomb_count(&self) -> usize {
        self.bomb_count
    }

    /// Returns the number of flags currently placed.
    #[must_use]
    #[inline]
    pub const fn flags_placed(&self) -> usize {
        self.flags_placed
    }

    /// Returns `true` if `pos` lies on the board.
    #[must_use]
    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x() < usize::from(self.width) && pos.y() < usize::from(self.height)
    }

    /// Iterates over all board positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Returns the player view of a cell.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    #[must_use]
    #[inline]
    pub fn view(&self, pos: Position) -> CellView {
        self.views[self.index(pos)]
    }

    /// Returns the clue shown at `pos`, if the cell is revealed and safe.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    #[must_use]
    #[inline]
    pub fn revealed_clue(&self, pos: Position) -> Option<u8> {
        self.view(pos).clue()
    }

    /// Returns `true` if the player placed a flag on `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    #[must_use]
    #[inline]
    pub fn is_flagged(&self, pos: Position) -> bool {
        self.flags[self.index(pos)]
    }

    /// Returns the ground-truth mine state of `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    #[must_use]
    #[inline]
    pub fn is_mine(&self, pos: Position) -> bool {
        self.mines[self.index(pos)]
    }

    /// Returns the ground-truth clue of `pos` (0 for mine cells).
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    #[must_use]
    #[inline]
    pub fn clue(&self, pos: Position) -> u8 {
        self.clues[self.index(pos)]
    }

    /// Returns the in-bounds 8-neighbors of `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    #[must_use]
    #[inline]
    pub fn neighbors(&self, pos: Position) -> &[Position] {
        self.neighbors.neighbors(pos)
    }

    /// Counts hidden cells without a flag.
    #[must_use]
    pub fn hidden_unflagged_count(&self) -> usize {
        self.positions()
            .filter(|&pos| self.view(pos).is_hidden() && !self.is_flagged(pos))
            .count()
    }

    /// Returns `true` if every non-mine cell is revealed (the win condition).
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.positions()
            .all(|pos| self.is_mine(pos) || !self.view(pos).is_hidden())
    }

    /// Returns `true` if every mine carries a flag.
    #[must_use]
    pub fn all_mines_flagged(&self) -> bool {
        self.positions()
            .all(|pos| !self.is_mine(pos) || self.is_flagged(pos))
    }

    /// Reveals a cell, flood-filling through zero clues.
    ///
    /// Flagged and already-revealed cells are left untouched. Revealing a
    /// mine marks it [`CellView::Exploded`] and returns [`Reveal::Exploded`].
    ///
    /// The flood fill is iterative; the worst case (an all-zero board)
    /// reveals every cell without recursing.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    pub fn reveal(&mut self, pos: Position) -> Reveal {
        if !self.view(pos).is_hidden() || self.is_flagged(pos) {
            return Reveal::Revealed(Vec::new());
        }
        if self.is_mine(pos) {
            let idx = self.index(pos);
            self.views[idx] = CellView::Exploded;
            return Reveal::Exploded;
        }

        let mut revealed = Vec::new();
        let mut stack = vec![pos];
        while let Some(cell) = stack.pop() {
            if !self.view(cell).is_hidden() || self.is_flagged(cell) || self.is_mine(cell) {
                continue;
            }
            let clue = self.clue(cell);
            let idx = self.index(cell);
            self.views[idx] = CellView::Revealed(clue);
            revealed.push(cell);
            if clue == 0 {
                stack.extend_from_slice(self.neighbors.neighbors(cell));
            }
        }
        Reveal::Revealed(revealed)
    }

    /// Places or removes a flag on a hidden cell.
    ///
    /// Returns `true` if the flag state changed. Revealed cells cannot be
    /// flagged.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    pub fn set_flag(&mut self, pos: Position, flagged: bool) -> bool {
        if !self.view(pos).is_hidden() {
            return false;
        }
        let idx = self.index(pos);
        if self.flags[idx] == flagged {
            return false;
        }
        self.flags[idx] = flagged;
        if flagged {
            self.flags_placed += 1;
        } else {
            self.flags_placed -= 1;
        }
        true
    }

    /// Exposes all still-hidden mines as [`CellView::RevealedBomb`].
    ///
    /// Called by game front-ends after a loss; flags are left in place.
    pub fn expose_bombs(&mut self) {
        for pos in self.positions().collect::<Vec<_>>() {
            if self.is_mine(pos) && self.view(pos).is_hidden() {
                let idx = self.index(pos);
                self.views[idx] = CellView::RevealedBomb;
            }
        }
    }
}

impl Display for Board {
    /// Renders the player view: `#` hidden, `F` flagged, `*` exploded or
    /// exposed mines, digits for revealed clues.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Position::new(x, y);
                let symbol = if self.is_flagged(pos) {
                    'F'
                } else {
                    match self.view(pos) {
                        CellView::Hidden => '#',
                        CellView::Revealed(clue) => char::from(b'0' + clue),
                        CellView::Exploded | CellView::RevealedBomb => '*',
                    }
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn small_board() -> Board {
        // 1 1 1
        // 1 * 1
        // 1 1 1
        Board::with_mines(3, 3, &[Position::new(1, 1)]).unwrap()
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        assert_eq!(
            Board::with_mines(0, 5, &[]).unwrap_err(),
            BoardError::EmptyDimensions
        );
        assert_eq!(
            Board::with_mines(5, 0, &[]).unwrap_err(),
            BoardError::EmptyDimensions
        );
    }

    #[test]
    fn test_rejects_out_of_bounds_mine() {
        assert_eq!(
            Board::with_mines(3, 3, &[Position::new(3, 0)]).unwrap_err(),
            BoardError::OutOfBounds(Position::new(3, 0))
        );
    }

    #[test]
    fn test_rejects_duplicate_mine() {
        let dup = Position::new(1, 2);
        assert_eq!(
            Board::with_mines(3, 3, &[dup, dup]).unwrap_err(),
            BoardError::DuplicateMine(dup)
        );
    }

    #[test]
    #[should_panic]
    fn test_view_out_of_bounds_panics() {
        let board = small_board();
        let _ = board.view(Position::new(3, 0));
    }

    #[test]
    fn test_clues_around_single_mine() {
        let board = small_board();
        for pos in board.positions() {
            if pos == Position::new(1, 1) {
                assert!(board.is_mine(pos));
            } else {
                assert_eq!(board.clue(pos), 1, "clue at {pos}");
            }
        }
    }

    #[test]
    fn test_reveal_mine_explodes() {
        let mut board = small_board();
        assert_eq!(board.reveal(Position::new(1, 1)), Reveal::Exploded);
        assert_eq!(board.view(Position::new(1, 1)), CellView::Exploded);
    }

    #[test]
    fn test_reveal_flood_fills_zero_board() {
        // Flood fill must cover the whole board iteratively.
        let mut board = Board::with_mines(64, 64, &[]).unwrap();
        let Reveal::Revealed(cells) = board.reveal(Position::new(0, 0)) else {
            panic!("no mines to hit");
        };
        assert_eq!(cells.len(), 64 * 64);
        assert!(board.is_cleared());
    }

    #[test]
    fn test_reveal_stops_at_nonzero_clues() {
        let mut board = Board::with_mines(4, 1, &[Position::new(3, 0)]).unwrap();
        let Reveal::Revealed(cells) = board.reveal(Position::new(0, 0)) else {
            panic!("(0, 0) is safe");
        };
        // 0 0 1 *  the flood runs through the zeros and stops on the 1.
        assert_eq!(cells.len(), 3);
        assert_eq!(board.revealed_clue(Position::new(2, 0)), Some(1));
        assert!(board.view(Position::new(3, 0)).is_hidden());
    }

    #[test]
    fn test_flood_fill_does_not_cross_flags() {
        let mut board = Board::with_mines(3, 1, &[]).unwrap();
        assert!(board.set_flag(Position::new(1, 0), true));
        let Reveal::Revealed(cells) = board.reveal(Position::new(0, 0)) else {
            panic!("no mines on this board");
        };
        assert_eq!(cells, [Position::new(0, 0)]);
        assert!(board.view(Position::new(1, 0)).is_hidden());
    }

    #[test]
    fn test_set_flag_counts_and_rules() {
        let mut board = small_board();
        let pos = Position::new(0, 0);
        assert!(board.set_flag(pos, true));
        assert!(!board.set_flag(pos, true));
        assert_eq!(board.flags_placed(), 1);
        assert!(board.set_flag(pos, false));
        assert_eq!(board.flags_placed(), 0);

        // A revealed cell cannot be flagged.
        board.reveal(pos);
        assert!(!board.set_flag(pos, true));
    }

    #[test]
    fn test_cleared_and_all_mines_flagged() {
        let mut board = small_board();
        assert!(!board.is_cleared());
        for pos in board.positions().collect::<Vec<_>>() {
            if !board.is_mine(pos) {
                board.reveal(pos);
            }
        }
        assert!(board.is_cleared());

        assert!(!board.all_mines_flagged());
        board.set_flag(Position::new(1, 1), true);
        assert!(board.all_mines_flagged());
    }

    #[test]
    fn test_expose_bombs_after_loss() {
        let mut board = Board::with_mines(3, 1, &[Position::new(0, 0), Position::new(2, 0)])
            .unwrap();
        board.reveal(Position::new(0, 0));
        board.expose_bombs();
        assert_eq!(board.view(Position::new(0, 0)), CellView::Exploded);
        assert_eq!(board.view(Position::new(2, 0)), CellView::RevealedBomb);
    }

    proptest! {
        // Clue soundness: every non-mine cell counts its mine neighbors.
        #[test]
        fn prop_clues_count_mine_neighbors(
            mines in prop::collection::hash_set((0_u16..8, 0_u16..8), 0..20)
        ) {
            let mines: Vec<Position> =
                mines.into_iter().map(|(x, y)| Position::new(x, y)).collect();
            let board = Board::with_mines(8, 8, &mines).unwrap();
            for pos in board.positions() {
                if board.is_mine(pos) {
                    continue;
                }
                let expected = board
                    .neighbors(pos)
                    .iter()
                    .filter(|&&n| board.is_mine(n))
                    .count();
                prop_assert_eq!(usize::from(board.clue(pos)), expected);
            }
        }

        // Revealing never touches ground truth and never unreveals.
        #[test]
        fn prop_reveal_is_monotone(
            mines in prop::collection::hash_set((0_u16..6, 0_u16..6), 0..8),
            pokes in prop::collection::vec((0_u16..6, 0_u16..6), 1..12)
        ) {
            let mines: Vec<Position> =
                mines.into_iter().map(|(x, y)| Position::new(x, y)).collect();
            let mut board = Board::with_mines(6, 6, &mines).unwrap();
            let truth: Vec<bool> = board.positions().map(|p| board.is_mine(p)).collect();

            let mut revealed = 0_usize;
            for (x, y) in pokes {
                board.reveal(Position::new(x, y));
                let now = board
                    .positions()
                    .filter(|&p| !board.view(p).is_hidden())
                    .count();
                prop_assert!(now >= revealed);
                revealed = now;
            }
            let truth_after: Vec<bool> = board.positions().map(|p| board.is_mine(p)).collect();
            prop_assert_eq!(truth, truth_after);
        }
    }
}
