use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::BOARD_SIDE;

/// Single coordinate axis, used for columns and rows.
pub type Coord = u8;

/// Count type used for mine counts and cell counts.
pub type CellCount = u8;

/// Two-dimensional coordinates `(x, y)`, that is `(column, row)`.
pub type Coord2 = (Coord, Coord);

/// Row-major cell position in `0..CELL_COUNT`.
pub type CellIndex = u8;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn index_to_coords(index: CellIndex) -> Coord2 {
    (index % BOARD_SIDE, index / BOARD_SIDE)
}

pub const fn coords_to_index((x, y): Coord2) -> CellIndex {
    y * BOARD_SIDE + x
}

/// Direction of a selection move, every direction wraps around at the board edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Index reached by moving one cell from `index`, staying in the same column for vertical moves and in the same
    /// row for horizontal ones.
    pub const fn step(self, index: CellIndex) -> CellIndex {
        const LAST: Coord = BOARD_SIDE - 1;
        let (x, y) = index_to_coords(index);
        match self {
            Self::Up if y == 0 => index + BOARD_SIDE * LAST,
            Self::Up => index - BOARD_SIDE,
            Self::Down if y == LAST => index - BOARD_SIDE * LAST,
            Self::Down => index + BOARD_SIDE,
            Self::Left if x == 0 => index + LAST,
            Self::Left => index - 1,
            Self::Right if x == LAST => index - LAST,
            Self::Right => index + 1,
        }
    }
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (size_x, size_y) = self.dim();
        let size = (
            size_x.try_into().unwrap_or(Coord::MAX),
            size_y.try_into().unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, size)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Iterates the clipped 3x3 neighborhood of a cell, the center excluded.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }

    /// Neighborhood of a cell on the fixed board.
    pub fn on_board(index: CellIndex) -> Self {
        Self::new(index_to_coords(index), (BOARD_SIDE, BOARD_SIDE))
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
