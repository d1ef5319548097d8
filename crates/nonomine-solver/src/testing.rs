//! Test harness shared by the strategy tests.

use nonomine_core::{Board, Position, Reveal};

use crate::{SolveState, Strategy, StrategyStep};

/// Builds a board from an ASCII layout, one string per row. `'*'` marks
/// a mine; every other character is a safe cell.
#[track_caller]
pub(crate) fn board_from_layout(layout: &[&str]) -> Board {
    let height = u16::try_from(layout.len()).unwrap();
    let width = u16::try_from(layout[0].len()).unwrap();
    let mut mines = Vec::new();
    for (y, row) in layout.iter().enumerate() {
        assert_eq!(row.len(), usize::from(width), "ragged layout row {y}");
        for (x, ch) in row.chars().enumerate() {
            if ch == '*' {
                mines.push(Position::new(
                    u16::try_from(x).unwrap(),
                    u16::try_from(y).unwrap(),
                ));
            }
        }
    }
    Board::with_mines(width, height, &mines).unwrap()
}

/// Fluent driver for exercising a single strategy against a board.
pub(crate) struct SolveTester {
    board: Board,
}

impl SolveTester {
    #[track_caller]
    pub(crate) fn from_layout(layout: &[&str]) -> Self {
        Self {
            board: board_from_layout(layout),
        }
    }

    /// Reveals a cell that is known to be safe.
    #[track_caller]
    pub(crate) fn reveal(mut self, pos: Position) -> Self {
        assert!(
            !matches!(self.board.reveal(pos), Reveal::Exploded),
            "setup revealed a mine at {pos}"
        );
        self
    }

    pub(crate) fn flag(mut self, pos: Position) -> Self {
        self.board.set_flag(pos, true);
        self
    }

    pub(crate) fn state(&mut self) -> SolveState<'_> {
        SolveState::new(&mut self.board)
    }

    /// Applies the strategy once, asserting that it makes progress.
    #[track_caller]
    pub(crate) fn apply_once(mut self, strategy: &impl Strategy) -> Self {
        let mut state = SolveState::new(&mut self.board);
        let progress = strategy.apply(&mut state).unwrap();
        assert!(progress, "{} made no progress", strategy.name());
        self
    }

    /// Applies the strategy once, asserting that it makes no progress.
    #[track_caller]
    pub(crate) fn apply_none(mut self, strategy: &impl Strategy) {
        let mut state = SolveState::new(&mut self.board);
        let progress = strategy.apply(&mut state).unwrap();
        assert!(!progress, "{} made unexpected progress", strategy.name());
    }

    /// Applies the strategy once, asserting that it reports the board
    /// as inconsistent.
    #[track_caller]
    pub(crate) fn apply_inconsistent(mut self, strategy: &impl Strategy) {
        let mut state = SolveState::new(&mut self.board);
        assert!(
            strategy.apply(&mut state).is_err(),
            "{} accepted an inconsistent board",
            strategy.name()
        );
    }

    #[track_caller]
    pub(crate) fn find_step(mut self, strategy: &impl Strategy) -> Option<StrategyStep> {
        let state = SolveState::new(&mut self.board);
        strategy.find_step(&state).unwrap()
    }

    #[track_caller]
    pub(crate) fn assert_flagged(self, pos: Position) -> Self {
        assert!(self.board.is_flagged(pos), "{pos} is not flagged");
        self
    }

    #[track_caller]
    pub(crate) fn assert_revealed(self, pos: Position) -> Self {
        assert!(
            self.board.view(pos).clue().is_some(),
            "{pos} is not revealed"
        );
        self
    }

    /// Asserts that at least one of the given cells is flagged.
    #[track_caller]
    pub(crate) fn assert_flagged_any(self, cells: &[Position]) -> Self {
        assert!(
            cells.iter().any(|&pos| self.board.is_flagged(pos)),
            "none of {cells:?} is flagged"
        );
        self
    }

    /// Asserts that at least one of the given cells is revealed.
    #[track_caller]
    pub(crate) fn assert_safe_somewhere(self, cells: &[Position]) -> Self {
        assert!(
            cells.iter().any(|&pos| self.board.view(pos).clue().is_some()),
            "none of {cells:?} is revealed"
        );
        self
    }
}
