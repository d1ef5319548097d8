//! Precomputed neighbor table.

use tinyvec::ArrayVec;

use crate::Position;

/// Precomputed in-bounds 8-neighborhoods for every cell of a board.
///
/// Built once per `(width, height)` pair and owned by the board it belongs
/// to. Entries are stored in row-major scan order of the offsets, which keeps
/// lookups cache-friendly; no consumer relies on the order.
///
/// # Examples
///
/// ```
/// use nonomine_core::{NeighborCache, Position};
///
/// let cache = NeighborCache::new(5, 5);
/// assert_eq!(cache.neighbors(Position::new(0, 0)).len(), 3);
/// assert_eq!(cache.neighbors(Position::new(2, 0)).len(), 5);
/// assert_eq!(cache.neighbors(Position::new(2, 2)).len(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct NeighborCache {
    width: usize,
    cells: Vec<ArrayVec<[Position; 8]>>,
}

impl NeighborCache {
    /// Builds the neighbor table for a `width` × `height` board.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let w = usize::from(width);
        let h = usize::from(height);
        let mut cells = Vec::with_capacity(w * h);

        for y in 0..height {
            for x in 0..width {
                let mut entry = ArrayVec::new();
                for dy in -1_i32..=1 {
                    for dx in -1_i32..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = i32::from(x) + dx;
                        let ny = i32::from(y) + dy;
                        if (0..i32::from(width)).contains(&nx)
                            && (0..i32::from(height)).contains(&ny)
                        {
                            #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                            entry.push(Position::new(nx as u16, ny as u16));
                        }
                    }
                }
                cells.push(entry);
            }
        }

        Self { width: w, cells }
    }

    /// Returns the in-bounds 8-neighbors of `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board the cache was built for.
    #[must_use]
    #[inline]
    pub fn neighbors(&self, pos: Position) -> &[Position] {
        &self.cells[pos.y() * self.width + pos.x()]
    }
}
