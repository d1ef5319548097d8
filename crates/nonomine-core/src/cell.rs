//! Per-cell player view.

/// What the player has seen of a single cell.
///
/// The view never reveals ground truth on its own: a hidden cell may or may
/// not be a mine. `Exploded` marks the mine that ended a game, while
/// `RevealedBomb` marks the remaining mines exposed after a loss.
///
/// # Examples
///
/// ```
/// use nonomine_core::CellView;
///
/// let view = CellView::Revealed(3);
/// assert_eq!(view.clue(), Some(3));
/// assert!(!view.is_hidden());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellView {
    /// The cell has not been revealed.
    #[default]
    Hidden,
    /// The cell is revealed and shows its clue (0-8 adjacent mines).
    Revealed(u8),
    /// The cell was a mine and was revealed during play.
    Exploded,
    /// The cell is a mine exposed after the game ended.
    RevealedBomb,
}

impl CellView {
    /// Returns `true` if the cell has not been revealed.
    #[must_use]
    #[inline]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    /// Returns the clue number if the cell is revealed and safe.
    #[must_use]
    #[inline]
    pub const fn clue(self) -> Option<u8> {
        match self {
            Self::Revealed(clue) => Some(clue),
            Self::Hidden | Self::Exploded | Self::RevealedBomb => None,
        }
    }
}
