//! Core data structures for the Nonomine Minesweeper toolkit.
//!
//! This crate provides the board model shared by the solver and the board
//! generator:
//!
//! - [`position`]: board coordinates and Chebyshev distance helpers
//! - [`cell`]: the per-cell player view ([`CellView`])
//! - [`neighbors`]: the precomputed in-bounds 8-neighborhood table
//!   ([`NeighborCache`])
//! - [`board`]: the board itself: mine layout, clue numbers, and the
//!   revealed/flagged overlays mutated during play ([`Board`])
//! - [`snapshot`]: the persisted board record ([`BoardSnapshot`])
//!
//! The board owns its neighbor cache; there is no process-wide cache keyed by
//! dimensions. Ground truth (`mine`, `clue`) is fixed at construction, while
//! the view and flag overlays change as cells are revealed and flagged.
//!
//! # Examples
//!
//! ```
//! use nonomine_core::{Board, CellView, Position, Reveal};
//!
//! let mut board = Board::with_mines(3, 1, &[Position::new(1, 0)])?;
//! assert_eq!(board.bomb_count(), 1);
//!
//! // Reveal the left cell: it touches the mine, so it shows a 1.
//! let Reveal::Revealed(cells) = board.reveal(Position::new(0, 0)) else {
//!     unreachable!("(0, 0) is not a mine");
//! };
//! assert_eq!(cells, [Position::new(0, 0)]);
//! assert_eq!(board.view(Position::new(0, 0)), CellView::Revealed(1));
//! # Ok::<(), nonomine_core::BoardError>(())
//! ```

pub use self::{board::*, cell::*, error::*, neighbors::*, position::*, snapshot::*};

mod board;
mod cell;
mod error;
mod neighbors;
mod position;
mod snapshot;
