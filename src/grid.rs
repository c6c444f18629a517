use thiserror::Error;

use crate::CellIndex;

/// Relative offsets of the fixed seed pattern, as `(row, col)`.
///
/// This is the five-cell glider-like cluster every fresh grid starts with.
pub const SEED_OFFSETS: [(CellIndex, CellIndex); 5] = [(1, 1), (2, 2), (2, 3), (3, 1), (3, 2)];

/// Smallest grid side that can hold [`SEED_OFFSETS`]
pub const MIN_SIDE: CellIndex = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid of {height}x{width} is smaller than the minimum of {MIN_SIDE}x{MIN_SIDE}")]
    TooSmall { height: CellIndex, width: CellIndex },

    #[error("Cell ({y}, {x}) is outside a {height}x{width} grid")]
    OutOfBounds {
        y: CellIndex,
        x: CellIndex,
        height: CellIndex,
        width: CellIndex,
    },
}

/// A bounded, dense boolean grid of cells, addressed by `(row, col)`.
///
/// Storage is row-major; every coordinate inside `height x width` holds a
/// defined boolean, and nothing exists outside it (hard edges, no wraparound).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: CellIndex,
    width: CellIndex,

    /// Row-major cell states, `cells[y * width + x]`
    cells: Vec<bool>,
}

impl Grid {
    /// Create a `height x width` grid, dead everywhere except the fixed seed
    /// pattern at [`SEED_OFFSETS`].
    ///
    /// Grids smaller than `4x4` cannot hold the seed and are rejected.
    pub fn new(height: CellIndex, width: CellIndex) -> Result<Self, GridError> {
        if height < MIN_SIDE || width < MIN_SIDE {
            return Err(GridError::TooSmall { height, width });
        }

        let mut grid = Self {
            height,
            width,
            cells: vec![false; height * width],
        };

        for (y, x) in SEED_OFFSETS {
            grid.cells[y * width + x] = true;
        }

        Ok(grid)
    }

    /// Create an all-dead grid of the same dimensions, without the seed.
    ///
    /// Used as the target buffer when computing the next generation.
    pub(crate) fn dead_like(other: &Self) -> Self {
        Self {
            height: other.height,
            width: other.width,
            cells: vec![false; other.height * other.width],
        }
    }

    pub fn height(&self) -> CellIndex {
        self.height
    }

    pub fn width(&self) -> CellIndex {
        self.width
    }

    /// Bounds-checked read. `None` outside the grid.
    pub fn get(&self, y: CellIndex, x: CellIndex) -> Option<bool> {
        if y >= self.height || x >= self.width {
            return None;
        }

        Some(self.cells[y * self.width + x])
    }

    /// Bounds-checked write.
    ///
    /// Out-of-bounds writes are an error rather than a silent no-op. The
    /// backing storage is never grown or reinterpreted by an edit.
    pub fn set(&mut self, y: CellIndex, x: CellIndex, alive: bool) -> Result<(), GridError> {
        if y >= self.height || x >= self.width {
            return Err(GridError::OutOfBounds {
                y,
                x,
                height: self.height,
                width: self.width,
            });
        }

        self.cells[y * self.width + x] = alive;

        Ok(())
    }

    /// Number of live neighbors of `(y, x)` in its Moore neighborhood.
    ///
    /// Neighbors beyond the grid boundary do not exist and count 0; the cell
    /// itself is excluded from its own count.
    pub fn live_neighbors(&self, y: CellIndex, x: CellIndex) -> u8 {
        let mut n = 0;

        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dy == 0 && dx == 0 {
                    continue;
                }

                let ny = y as i64 + dy;
                let nx = x as i64 + dx;

                if ny < 0 || nx < 0 {
                    continue;
                }

                if self.get(ny as CellIndex, nx as CellIndex) == Some(true) {
                    n += 1;
                }
            }
        }

        n
    }

    /// Iterate over the coordinates of every live cell, in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (CellIndex, CellIndex)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| (i / self.width, i % self.width))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
}
