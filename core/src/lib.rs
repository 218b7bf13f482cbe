#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod reveal;
mod snapshot;
mod types;

/// Cells per side of the square board.
pub const BOARD_SIDE: Coord = 8;

/// Total number of addressable cells.
pub const CELL_COUNT: CellCount = BOARD_SIDE * BOARD_SIDE;

/// Mines laid on every generated board.
pub const MINE_TOTAL: CellCount = 10;

/// Whether the zero-threat cascade may clear cells the player has flagged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadeFlags {
    /// Flagged cells stop the cascade and keep their flag.
    Respect,
    /// Flagged cells are cleared by the cascade like any hidden cell, dropping the flag.
    Sweep,
}

impl Default for CascadeFlags {
    fn default() -> Self {
        Self::Respect
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for mine placement, the same seed replays the same sequence of games.
    pub seed: u64,
    pub mines: CellCount,
    pub cascade_flags: CascadeFlags,
}

impl EngineConfig {
    pub const fn new(seed: u64) -> Self {
        Self {
            seed,
            mines: MINE_TOTAL,
            cascade_flags: CascadeFlags::Respect,
        }
    }

    pub fn with_mines(self, mines: CellCount) -> Self {
        Self {
            mines: mines.min(CELL_COUNT),
            ..self
        }
    }

    pub const fn with_cascade_flags(self, cascade_flags: CascadeFlags) -> Self {
        Self {
            cascade_flags,
            ..self
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Where the mines are, fixed for the whole life of a board.
///
/// Serialized as its bare mine mask, the count is recomputed on the way back in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<bool>", into = "Array2<bool>")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn empty() -> Self {
        let size = (BOARD_SIDE, BOARD_SIDE);
        Self {
            mine_mask: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let side = usize::from(BOARD_SIDE);
        if mine_mask.dim() != (side, side) {
            return Err(GameError::InvalidBoardShape);
        }

        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .map_err(|_| GameError::TooManyMines)?;
        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    /// Builds a layout from mine positions, repeated positions count once.
    pub fn from_mine_indices(mine_indices: &[CellIndex]) -> Result<Self> {
        let mut layout = Self::empty();

        for &index in mine_indices {
            let index = validate_index(index)?;
            layout.place_mine(index);
        }

        Ok(layout)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        CELL_COUNT - self.mine_count
    }

    pub fn contains_mine(&self, index: CellIndex) -> Result<bool> {
        Ok(self[validate_index(index)?])
    }

    pub fn adjacent_mine_count(&self, index: CellIndex) -> Result<u8> {
        validate_index(index).map(|index| self.threat_at(index))
    }

    pub(crate) fn threat_at(&self, index: CellIndex) -> u8 {
        self.iter_neighbors(index)
            .filter(|&pos| self[pos])
            .fold(0, |count, _| count + 1)
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = CellIndex> + '_ {
        (0..CELL_COUNT).filter(|&index| self[index])
    }

    pub(crate) fn iter_neighbors(&self, index: CellIndex) -> impl Iterator<Item = CellIndex> + use<> {
        self.mine_mask
            .iter_neighbors(index_to_coords(index))
            .map(coords_to_index)
    }

    /// Lays a mine at `index`, returns `false` when one was already there.
    pub(crate) fn place_mine(&mut self, index: CellIndex) -> bool {
        let slot = &mut self.mine_mask[index_to_coords(index).to_nd_index()];
        if *slot {
            false
        } else {
            *slot = true;
            self.mine_count += 1;
            true
        }
    }
}

impl Default for MineLayout {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Array2<bool>> for MineLayout {
    type Error = GameError;

    fn try_from(mine_mask: Array2<bool>) -> Result<Self> {
        Self::from_mine_mask(mine_mask)
    }
}

impl From<MineLayout> for Array2<bool> {
    fn from(layout: MineLayout) -> Self {
        layout.mine_mask
    }
}

/// # Panics
///
/// Panics when `index` is not below [`CELL_COUNT`], use [`MineLayout::contains_mine`] for untrusted input.
impl Index<CellIndex> for MineLayout {
    type Output = bool;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.mine_mask[index_to_coords(index).to_nd_index()]
    }
}

pub fn validate_index(index: CellIndex) -> Result<CellIndex> {
    if index < CELL_COUNT {
        Ok(index)
    } else {
        Err(GameError::InvalidIndex)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Cleared,
    Detonated,
    Won,
}
