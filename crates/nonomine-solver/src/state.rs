//! Mutable solving session over a board.

use nonomine_core::{Board, Position, Reveal};

use crate::{InconsistencyReason, SolverError};

/// The local constraint of one revealed clue.
///
/// For a clue `k` with `f` flagged neighbors, exactly `remaining = k - f` of
/// the hidden unflagged neighbors are mines. The constraint is only
/// constructed when `0 <= remaining <= hidden.len()`; anything else means
/// the current flags are wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    cell: Position,
    remaining: usize,
    hidden: Vec<Position>,
}

impl Constraint {
    /// Returns the clue cell this constraint belongs to.
    #[must_use]
    pub fn cell(&self) -> Position {
        self.cell
    }

    /// Returns how many of the hidden neighbors are mines.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Returns the hidden unflagged neighbors the constraint ranges over.
    #[must_use]
    pub fn hidden(&self) -> &[Position] {
        &self.hidden
    }
}

/// Cells whose surroundings changed since the last basic-rule pass.
///
/// Keeps a membership bitmap alongside an insertion-ordered list so marking
/// is O(1) and iteration touches each cell once.
#[derive(Debug)]
struct DirtySet {
    width: usize,
    marked: Vec<bool>,
    cells: Vec<Position>,
}

impl DirtySet {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            marked: vec![false; width * height],
            cells: Vec::new(),
        }
    }

    fn mark(&mut self, pos: Position) {
        let idx = pos.y() * self.width + pos.x();
        if !self.marked[idx] {
            self.marked[idx] = true;
            self.cells.push(pos);
        }
    }

    fn take(&mut self) -> Vec<Position> {
        self.marked.fill(false);
        std::mem::take(&mut self.cells)
    }
}

/// A solving session: a mutable borrow of a board plus the bookkeeping the
/// strategies share.
///
/// All mutation the strategies perform goes through [`reveal`] and
/// [`place_flag`], which maintain the dirty set. Ground truth is consulted
/// only by [`reveal`] (the game itself answers what a revealed cell shows);
/// the deductions never peek at it.
///
/// [`reveal`]: Self::reveal
/// [`place_flag`]: Self::place_flag
#[derive(Debug)]
pub struct SolveState<'b> {
    board: &'b mut Board,
    dirty: DirtySet,
}

impl<'b> SolveState<'b> {
    /// Starts a session, marking every revealed cell and its neighbors
    /// dirty so the first basic-rule pass sees the whole visible border.
    pub fn new(board: &'b mut Board) -> Self {
        let mut dirty = DirtySet::new(usize::from(board.width()), usize::from(board.height()));
        for pos in board.positions() {
            if !board.view(pos).is_hidden() {
                dirty.mark(pos);
                for &neighbor in board.neighbors(pos) {
                    dirty.mark(neighbor);
                }
            }
        }
        Self { board, dirty }
    }

    /// Returns the board under deduction.
    #[must_use]
    pub fn board(&self) -> &Board {
        self.board
    }

    /// Reveals a cell deduced safe, flood-filling through zeros.
    ///
    /// Newly revealed cells and their neighbors are marked dirty.
    ///
    /// # Errors
    ///
    /// Returns [`InconsistencyReason::RevealedMine`] if the cell is in fact
    /// a mine; a sound deduction can only hit this when the player's flags
    /// are wrong.
    pub fn reveal(&mut self, pos: Position) -> Result<(), SolverError> {
        match self.board.reveal(pos) {
            Reveal::Exploded => Err(InconsistencyReason::RevealedMine(pos).into()),
            Reveal::Revealed(cells) => {
                for cell in cells {
                    self.mark_dirty_around(cell);
                }
                Ok(())
            }
        }
    }

    /// Flags a cell deduced to be a mine.
    ///
    /// Returns `true` if the flag was newly placed; the cell's neighborhood
    /// is then marked dirty.
    pub fn place_flag(&mut self, pos: Position) -> bool {
        let changed = self.board.set_flag(pos, true);
        if changed {
            self.mark_dirty_around(pos);
        }
        changed
    }

    /// Marks `pos` and its neighbors dirty.
    pub fn mark_dirty_around(&mut self, pos: Position) {
        self.dirty.mark(pos);
        for &neighbor in self.board.neighbors(pos) {
            self.dirty.mark(neighbor);
        }
    }

    /// Drains the dirty set, leaving it empty.
    ///
    /// A strategy that makes no progress must hand the cells back through
    /// [`restore_dirty`](Self::restore_dirty) so later passes still see
    /// them.
    pub fn take_dirty(&mut self) -> Vec<Position> {
        self.dirty.take()
    }

    /// Re-marks previously drained dirty cells.
    pub fn restore_dirty(&mut self, cells: &[Position]) {
        for &pos in cells {
            self.dirty.mark(pos);
        }
    }

    /// Returns the currently dirty cells in insertion order.
    #[must_use]
    pub fn dirty_cells(&self) -> &[Position] {
        &self.dirty.cells
    }

    /// Builds the constraint of the clue at `pos`, if there is one.
    ///
    /// Returns `None` when the cell is not a revealed clue or has no hidden
    /// unflagged neighbors left.
    ///
    /// # Errors
    ///
    /// Returns [`InconsistencyReason::UnsatisfiableClue`] when the clue's
    /// remaining value falls outside `0..=hidden`, which means a flag is
    /// wrong.
    pub fn constraint(&self, pos: Position) -> Result<Option<Constraint>, SolverError> {
        let Some(clue) = self.board.revealed_clue(pos) else {
            return Ok(None);
        };

        let mut hidden = Vec::new();
        let mut flagged = 0_usize;
        for &neighbor in self.board.neighbors(pos) {
            if self.board.is_flagged(neighbor) {
                flagged += 1;
            } else if self.board.view(neighbor).is_hidden() {
                hidden.push(neighbor);
            }
        }

        let Some(remaining) = usize::from(clue).checked_sub(flagged) else {
            return Err(InconsistencyReason::UnsatisfiableClue(pos).into());
        };
        if remaining > hidden.len() {
            return Err(InconsistencyReason::UnsatisfiableClue(pos).into());
        }
        if hidden.is_empty() {
            return Ok(None);
        }
        Ok(Some(Constraint {
            cell: pos,
            remaining,
            hidden,
        }))
    }

    /// Returns the frontier: hidden unflagged cells adjacent to at least
    /// one revealed clue, in row-major order.
    #[must_use]
    pub fn frontier(&self) -> Vec<Position> {
        self.board
            .positions()
            .filter(|&pos| {
                self.board.view(pos).is_hidden()
                    && !self.board.is_flagged(pos)
                    && self
                        .board
                        .neighbors(pos)
                        .iter()
                        .any(|&n| self.board.revealed_clue(n).is_some())
            })
            .collect()
    }

    /// Returns the number of mines not yet flagged.
    ///
    /// # Errors
    ///
    /// Returns [`InconsistencyReason::TooManyFlags`] when more flags are
    /// placed than the board has mines.
    pub fn remaining_mines(&self) -> Result<usize, SolverError> {
        self.board
            .bomb_count()
            .checked_sub(self.board.flags_placed())
            .ok_or_else(|| InconsistencyReason::TooManyFlags.into())
    }

    /// Returns `true` once the board is fully resolved: every non-mine cell
    /// revealed, or every mine flagged.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.board.is_cleared() || self.board.all_mines_flagged()
    }
}
