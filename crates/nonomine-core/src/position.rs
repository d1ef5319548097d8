//! Board coordinates.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A cell coordinate on a Minesweeper board.
///
/// `x` grows to the right, `y` grows downwards. Positions are plain value
/// types; bounds are enforced by the board that interprets them.
///
/// # Examples
///
/// ```
/// use nonomine_core::Position;
///
/// let pos = Position::new(3, 5);
/// assert_eq!(pos.x(), 3);
/// assert_eq!(pos.y(), 5);
/// assert_eq!(pos.to_string(), "(3, 5)");
/// ```
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    x: u16,
    y: u16,
}

impl Position {
    /// Creates a position from `x` and `y` coordinates.
    #[must_use]
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Returns the x coordinate.
    #[must_use]
    #[inline]
    pub const fn x(self) -> usize {
        self.x as usize
    }

    /// Returns the y coordinate.
    #[must_use]
    #[inline]
    pub const fn y(self) -> usize {
        self.y as usize
    }

    /// Returns the Chebyshev (chessboard) distance to `other`.
    ///
    /// Two cells are 8-neighbors exactly when their Chebyshev distance is 1,
    /// and the 3×3 neighborhoods of two clues can only overlap when their
    /// centers are at distance 2 or less.
    ///
    /// # Examples
    ///
    /// ```
    /// use nonomine_core::Position;
    ///
    /// assert_eq!(Position::new(0, 0).chebyshev_distance(Position::new(1, 1)), 1);
    /// assert_eq!(Position::new(2, 7).chebyshev_distance(Position::new(5, 8)), 3);
    /// ```
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> usize {
        let dx = self.x().abs_diff(other.x());
        let dy = self.y().abs_diff(other.y());
        dx.max(dy)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
