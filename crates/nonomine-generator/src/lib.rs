//! No-guess Minesweeper board generation.
//!
//! This crate places mines for a new game. The plain mode scatters mines
//! uniformly outside a safe zone around the player's first click; the
//! no-guess mode additionally plays every candidate layout through the
//! solver from `nonomine-solver` and only accepts boards that can be
//! finished by deduction alone.
//!
//! Generation is reproducible: every board is determined by a
//! [`BoardSeed`], and seeds round-trip through a 64-digit hex string that
//! can be shared between players. Long no-guess searches can be stopped
//! early through a [`CancelToken`].
//!
//! # Examples
//!
//! ```
//! use nonomine_core::Position;
//! use nonomine_generator::{BoardGenerator, GenerateParams};
//! use nonomine_solver::StrategySolver;
//!
//! let solver = StrategySolver::with_all_strategies();
//! let generator = BoardGenerator::new(&solver);
//!
//! let params = GenerateParams {
//!     width: 9,
//!     height: 9,
//!     bomb_count: 10,
//!     first_click: Position::new(4, 4),
//!     no_guess: true,
//! };
//! let generated = generator.generate(&params)?;
//! assert!(generated.warning.is_none());
//! # Ok::<(), nonomine_generator::GeneratorError>(())
//! ```

pub use self::{cancel::*, error::*, generator::*, seed::*};

mod cancel;
mod error;
mod generator;
mod seed;
