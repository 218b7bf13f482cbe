use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellHint {
    Blank,
    /// Cleared with no mined neighbors.
    Clear,
    Threat(u8),
    Flag,
    Mine,
}

impl CellHint {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Blank => "",
            Self::Clear => "-",
            Self::Threat(1) => "1",
            Self::Threat(2) => "2",
            Self::Threat(3) => "3",
            Self::Threat(4) => "4",
            Self::Threat(5) => "5",
            Self::Threat(6) => "6",
            Self::Threat(7) => "7",
            Self::Threat(8) => "8",
            Self::Threat(_) => "?",
            Self::Flag => "+",
            Self::Mine => "*",
        }
    }

    fn for_cell(cell: CellState, has_mine: bool, status: GameStatus) -> Self {
        match (status, cell) {
            // the end screens only show where the mines were
            (GameStatus::Won | GameStatus::Lost, _) if has_mine => Self::Mine,
            (GameStatus::Won | GameStatus::Lost, _) => Self::Blank,
            (GameStatus::Running, CellState::Hidden) => Self::Blank,
            (GameStatus::Running, CellState::Flagged) => Self::Flag,
            (GameStatus::Running, CellState::Cleared(0)) => Self::Clear,
            (GameStatus::Running, CellState::Cleared(count)) => Self::Threat(count),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub is_cleared: bool,
    pub is_flagged: bool,
    /// Only known once the cell is cleared or the game is over.
    pub has_mine: Option<bool>,
    pub threat_count: Option<u8>,
    pub hint: CellHint,
}

/// Read-only view of a game, handed to renderers after every intent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub cells: Vec<CellSnapshot>,
    pub selected_index: CellIndex,
    pub status: GameStatus,
    pub mines_left: i16,
    pub detonated: Option<CellIndex>,
}

impl BoardSnapshot {
    pub fn capture(
        board: &Board,
        selected_index: CellIndex,
        status: GameStatus,
        detonated: Option<CellIndex>,
    ) -> Self {
        let cells = board
            .iter_cells()
            .map(|(index, cell)| {
                let has_mine = board.mine_at(index);
                CellSnapshot {
                    is_cleared: cell.is_cleared(),
                    is_flagged: cell.is_flagged(),
                    has_mine: (cell.is_cleared() || status.is_finished()).then_some(has_mine),
                    threat_count: cell.threat_count(),
                    hint: CellHint::for_cell(cell, has_mine, status),
                }
            })
            .collect();

        Self {
            cells,
            selected_index,
            status,
            mines_left: board.mines_left(),
            detonated,
        }
    }

    pub fn cell(&self, index: CellIndex) -> Option<&CellSnapshot> {
        self.cells.get(usize::from(index))
    }

    pub fn hints(&self) -> impl Iterator<Item = CellHint> + '_ {
        self.cells.iter().map(|cell| cell.hint)
    }

    /// Cells currently drawn as mines.
    pub fn visible_mines(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells
            .iter()
            .zip(0..CELL_COUNT)
            .filter(|(cell, _)| cell.hint == CellHint::Mine)
            .map(|(_, index)| index)
    }

    /// Checks a snapshot that did not come from [`BoardSnapshot::capture`], e.g. one read back from storage.
    pub fn validate(&self) -> Result<()> {
        if self.cells.len() != usize::from(CELL_COUNT) {
            return Err(GameError::InvalidBoardShape);
        }
        validate_index(self.selected_index)?;
        if let Some(detonated) = self.detonated {
            validate_index(detonated)?;
        }
        Ok(())
    }
}
