use alloc::collections::{BTreeSet, VecDeque};

use crate::*;

/// Runs the reveal cascade over a board and decides whether the game is over.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RevealEngine {
    cascade_flags: CascadeFlags,
}

impl RevealEngine {
    pub const fn new(cascade_flags: CascadeFlags) -> Self {
        Self { cascade_flags }
    }

    /// Clears `index` and, when it has no mined neighbors, every cell reachable through zero-threat cells.
    ///
    /// Revealing a flagged or cleared cell is a no-op. The result reflects the end state right after the reveal.
    /// A mine never starts a cascade, even without mined neighbors.
    pub fn reveal(&self, board: &mut Board, index: CellIndex) -> Result<RevealOutcome> {
        let index = validate_index(index)?;
        if !matches!(board.cell(index), CellState::Hidden) {
            return Ok(RevealOutcome::NoChange);
        }

        let Some(threat_count) = board.clear(index) else {
            return Ok(RevealOutcome::NoChange);
        };
        log::debug!("Cleared cell {}, threat count: {}", index, threat_count);

        if threat_count == 0 && !board.mine_at(index) {
            self.cascade(board, index);
        }

        Ok(match end_state(board, index) {
            GameStatus::Lost => RevealOutcome::Detonated,
            GameStatus::Won => RevealOutcome::Won,
            GameStatus::Running => RevealOutcome::Cleared,
        })
    }

    /// Worklist flood-fill from an already cleared zero-threat cell, each cell is queued at most once.
    fn cascade(&self, board: &mut Board, origin: CellIndex) {
        let mut visited = BTreeSet::from([origin]);
        let mut to_visit = VecDeque::new();
        self.enqueue_neighbors(board, origin, &mut visited, &mut to_visit);
        log::trace!(
            "Starting cascade from {}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit_index) = to_visit.pop_front() {
            if !self.can_sweep(board.cell(visit_index)) {
                log::trace!("Skipping cell {}", visit_index);
                continue;
            }

            let Some(visit_threat_count) = board.clear(visit_index) else {
                continue;
            };
            log::trace!(
                "Cascade cleared cell {}, threat count: {}",
                visit_index,
                visit_threat_count
            );

            if visit_threat_count == 0 {
                self.enqueue_neighbors(board, visit_index, &mut visited, &mut to_visit);
            }
        }
    }

    fn enqueue_neighbors(
        &self,
        board: &Board,
        index: CellIndex,
        visited: &mut BTreeSet<CellIndex>,
        to_visit: &mut VecDeque<CellIndex>,
    ) {
        for pos in board.iter_neighbors(index) {
            if self.can_sweep(board.cell(pos)) && visited.insert(pos) {
                to_visit.push_back(pos);
            }
        }
    }

    fn can_sweep(&self, cell: CellState) -> bool {
        match (cell, self.cascade_flags) {
            (CellState::Hidden, _) => true,
            (CellState::Flagged, CascadeFlags::Sweep) => true,
            (CellState::Flagged, CascadeFlags::Respect) => false,
            (CellState::Cleared(_), _) => false,
        }
    }
}

/// Status of the game right after `last_revealed` was cleared, a detonation takes precedence over a win.
pub fn evaluate_end_state(board: &Board, last_revealed: CellIndex) -> Result<GameStatus> {
    validate_index(last_revealed).map(|index| end_state(board, index))
}

fn end_state(board: &Board, last_revealed: CellIndex) -> GameStatus {
    if board.mine_at(last_revealed) && board.cell(last_revealed).is_cleared() {
        GameStatus::Lost
    } else if board.uncleared_count() <= board.mine_total() {
        GameStatus::Won
    } else {
        GameStatus::Running
    }
}
