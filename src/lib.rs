#![no_std]

extern crate alloc;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod types;

/// Board dimensions and mine count requested for a game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validated constructor: both dimensions must be nonzero and the mine
    /// count strictly between zero and the total cell count.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        if size.0 == 0 || size.1 == 0 || mines == 0 || mines >= config.total_cells() {
            return Err(BoardError::InvalidConfiguration);
        }
        Ok(config)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Immutable mine layout: which cells hold a mine, fixed at creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    mask: Array2<bool>,
    count: CellCount,
}

impl MineField {
    pub(crate) fn from_mask(mask: Array2<bool>) -> Self {
        let count = mask.iter().filter(|&&mine| mine).count() as CellCount;
        Self { mask, count }
    }

    /// Builds a layout with mines at exactly the given coordinates.
    /// Duplicate coordinates collapse into one mine.
    pub fn from_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default(size.nd());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(BoardError::OutOfBounds);
            }
            mask[coords.nd()] = true;
        }

        let field = Self::from_mask(mask);
        GameConfig::new(size, field.count)?;
        Ok(field)
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.count)
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.mask.dim();
        (width as Coord, height as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mask.len() as CellCount
    }

    pub fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.count
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.mask[coords.nd()]
    }

    /// Number of mines among the up-to-8 neighbors of `coords`. The cell
    /// itself is never counted.
    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.size())
            .filter(|&pos| self.contains(pos))
            .count() as u8
    }

    pub(crate) fn validate(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.size();
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(BoardError::OutOfBounds)
        }
    }

    pub(crate) fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mask
            .indexed_iter()
            .filter(|&(_, &mine)| mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}
