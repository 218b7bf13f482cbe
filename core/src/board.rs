use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine layout plus the per-cell player state laid over it.
///
/// Mutators keep flagged and cleared exclusive per cell and keep the cleared/flagged counters in sync with the
/// grid. Deserialization replays the stored cells through the same mutators, so stored counters are never trusted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardCells")]
pub struct Board {
    mine_layout: MineLayout,
    cells: Array2<CellState>,
    cleared_count: CellCount,
    flagged_count: CellCount,
}

/// Stored form of a board, anything besides the layout and the cells is ignored.
#[derive(Deserialize)]
struct BoardCells {
    mine_layout: MineLayout,
    cells: Array2<CellState>,
}

impl Board {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = (BOARD_SIDE, BOARD_SIDE);
        Self {
            mine_layout,
            cells: Array2::default(size.to_nd_index()),
            cleared_count: 0,
            flagged_count: 0,
        }
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn mine_total(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn cell_at(&self, index: CellIndex) -> Result<CellState> {
        validate_index(index).map(|index| self.cell(index))
    }

    pub fn has_mine(&self, index: CellIndex) -> Result<bool> {
        self.mine_layout.contains_mine(index)
    }

    pub fn cleared_count(&self) -> CellCount {
        self.cleared_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn uncleared_count(&self) -> CellCount {
        CELL_COUNT - self.cleared_count
    }

    /// How many mines have not been flagged yet, negative when the player over-flags.
    pub fn mines_left(&self) -> i16 {
        i16::from(self.mine_total()) - i16::from(self.flagged_count)
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (CellIndex, CellState)> + '_ {
        (0..CELL_COUNT).map(|index| (index, self.cell(index)))
    }

    pub fn neighbors(&self, index: CellIndex) -> Result<impl Iterator<Item = CellIndex> + use<>> {
        validate_index(index).map(|index| self.iter_neighbors(index))
    }

    pub fn toggle_flag(&mut self, index: CellIndex) -> Result<MarkOutcome> {
        use CellState::*;
        use MarkOutcome::*;

        let coords = index_to_coords(validate_index(index)?).to_nd_index();
        Ok(match self.cells[coords] {
            Hidden => {
                self.cells[coords] = Flagged;
                self.flagged_count += 1;
                Changed
            }
            Flagged => {
                self.cells[coords] = Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Cleared(_) => NoChange,
        })
    }

    pub(crate) fn cell(&self, index: CellIndex) -> CellState {
        self.cells[index_to_coords(index).to_nd_index()]
    }

    pub(crate) fn mine_at(&self, index: CellIndex) -> bool {
        self.mine_layout[index]
    }

    pub(crate) fn iter_neighbors(&self, index: CellIndex) -> impl Iterator<Item = CellIndex> + use<> {
        self.mine_layout.iter_neighbors(index)
    }

    /// Clears a cell, dropping its flag if it had one, and returns its threat count.
    ///
    /// Returns `None` when the cell was already cleared.
    pub(crate) fn clear(&mut self, index: CellIndex) -> Option<u8> {
        let coords = index_to_coords(index).to_nd_index();
        match self.cells[coords] {
            CellState::Cleared(_) => None,
            previous => {
                if previous.is_flagged() {
                    self.flagged_count -= 1;
                }
                let threat_count = self.mine_layout.threat_at(index);
                self.cells[coords] = CellState::Cleared(threat_count);
                self.cleared_count += 1;
                Some(threat_count)
            }
        }
    }
}

impl TryFrom<BoardCells> for Board {
    type Error = GameError;

    fn try_from(BoardCells { mine_layout, cells }: BoardCells) -> Result<Self> {
        let side = usize::from(BOARD_SIDE);
        if cells.dim() != (side, side) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut board = Self::new(mine_layout);
        for index in 0..CELL_COUNT {
            match cells[index_to_coords(index).to_nd_index()] {
                CellState::Hidden => {}
                CellState::Flagged => {
                    board.toggle_flag(index)?;
                }
                CellState::Cleared(count) => {
                    if board.clear(index) != Some(count) {
                        return Err(GameError::InconsistentBoard);
                    }
                }
            }
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(MineLayout::empty())
    }
}
