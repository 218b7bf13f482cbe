use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell, flagged and cleared exclude each other.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    /// Cleared, holding the number of mined neighbors.
    Cleared(u8),
}

impl CellState {
    pub const fn is_cleared(self) -> bool {
        matches!(self, Self::Cleared(_))
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    pub const fn threat_count(self) -> Option<u8> {
        match self {
            Self::Cleared(count) => Some(count),
            Self::Hidden | Self::Flagged => None,
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}
