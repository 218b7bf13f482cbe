use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Running,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Running
    }
}

/// Discrete player action fed to [`GameEngine::dispatch`].
///
/// `Reveal` and `ToggleFlag` act on the selected cell when no index is given.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Move(Direction),
    Reveal(Option<CellIndex>),
    ToggleFlag(Option<CellIndex>),
    NewGame,
}

/// Owns the single active game: its board, the selection cursor and the status.
#[derive(Clone, Debug)]
pub struct GameEngine<G = RandomLayoutGenerator> {
    config: EngineConfig,
    generator: G,
    reveal_engine: RevealEngine,
    board: Board,
    selected_index: CellIndex,
    status: GameStatus,
    detonated: Option<CellIndex>,
}

impl GameEngine<RandomLayoutGenerator> {
    /// Starts a game with mines placed from `config.seed`.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_generator(config, RandomLayoutGenerator::new(config.seed))
    }
}

impl GameEngine<FixedLayoutGenerator> {
    /// Starts a game on a known layout, every reset replays the same layout.
    pub fn with_layout(config: EngineConfig, layout: MineLayout) -> Self {
        Self::with_generator(config, FixedLayoutGenerator::new(layout))
    }
}

impl<G: LayoutGenerator> GameEngine<G> {
    pub fn with_generator(config: EngineConfig, mut generator: G) -> Self {
        let board = Board::new(generator.generate(config.mines));
        log::debug!("New game with {} mines", board.mine_total());
        Self {
            config,
            generator,
            reveal_engine: RevealEngine::new(config.cascade_flags),
            board,
            selected_index: 0,
            status: GameStatus::Running,
            detonated: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn selected_index(&self) -> CellIndex {
        self.selected_index
    }

    pub fn detonated(&self) -> Option<CellIndex> {
        self.detonated
    }

    pub fn mines_left(&self) -> i16 {
        self.board.mines_left()
    }

    /// Discards the current game and lays out a fresh board, always accepted.
    pub fn reset_game(&mut self) {
        self.board = Board::new(self.generator.generate(self.config.mines));
        self.selected_index = 0;
        self.status = GameStatus::Running;
        self.detonated = None;
        log::debug!("New game with {} mines", self.board.mine_total());
    }

    pub fn new_game(&mut self) -> BoardSnapshot {
        self.reset_game();
        self.query_snapshot()
    }

    /// Moves the selection one cell with wraparound, ignored once the game is over.
    pub fn move_selection(&mut self, direction: Direction) -> CellIndex {
        if self.status.is_running() {
            self.selected_index = direction.step(self.selected_index);
        }
        self.selected_index
    }

    /// Reveals `index`, or the selected cell when `None`.
    ///
    /// Revealing a flagged or cleared cell, or revealing after the game ended, changes nothing.
    pub fn reveal(&mut self, index: Option<CellIndex>) -> Result<RevealOutcome> {
        let index = self.target(index)?;
        if !self.status.is_running() {
            return Ok(RevealOutcome::NoChange);
        }

        let outcome = self.reveal_engine.reveal(&mut self.board, index)?;
        match outcome {
            RevealOutcome::Detonated => self.end_game(GameStatus::Lost, Some(index)),
            RevealOutcome::Won => self.end_game(GameStatus::Won, None),
            RevealOutcome::Cleared | RevealOutcome::NoChange => {}
        }
        Ok(outcome)
    }

    /// Flips the flag on `index`, or on the selected cell when `None`.
    pub fn toggle_flag(&mut self, index: Option<CellIndex>) -> Result<MarkOutcome> {
        let index = self.target(index)?;
        if !self.status.is_running() {
            return Ok(MarkOutcome::NoChange);
        }

        self.board.toggle_flag(index)
    }

    pub fn query_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(
            &self.board,
            self.selected_index,
            self.status,
            self.detonated,
        )
    }

    /// Applies one intent to completion and hands back the resulting snapshot.
    pub fn dispatch(&mut self, intent: Intent) -> Result<BoardSnapshot> {
        log::trace!("Dispatching {:?}", intent);
        match intent {
            Intent::Move(direction) => {
                self.move_selection(direction);
            }
            Intent::Reveal(index) => {
                self.reveal(index)?;
            }
            Intent::ToggleFlag(index) => {
                self.toggle_flag(index)?;
            }
            Intent::NewGame => self.reset_game(),
        }
        Ok(self.query_snapshot())
    }

    fn target(&self, index: Option<CellIndex>) -> Result<CellIndex> {
        validate_index(index.unwrap_or(self.selected_index))
    }

    fn end_game(&mut self, status: GameStatus, detonated: Option<CellIndex>) {
        if self.status.is_finished() {
            return;
        }

        self.status = status;
        self.detonated = detonated;
        log::debug!("Game ended: {:?}", status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(mines: &[CellIndex]) -> GameEngine<FixedLayoutGenerator> {
        let layout = MineLayout::from_mine_indices(mines).unwrap();
        GameEngine::with_layout(EngineConfig::default(), layout)
    }

    #[test]
    fn new_engine_starts_running_at_origin() {
        let engine = GameEngine::new(EngineConfig::new(9));

        assert_eq!(engine.status(), GameStatus::Running);
        assert_eq!(engine.selected_index(), 0);
        assert_eq!(engine.board().mine_total(), MINE_TOTAL);
        assert_eq!(engine.board().cleared_count(), 0);
    }

    #[test]
    fn reveal_defaults_to_selection() {
        let mut engine = engine(&[0]);

        engine.move_selection(Direction::Down);
        engine.move_selection(Direction::Right);
        engine.move_selection(Direction::Right);
        assert_eq!(engine.selected_index(), 10);

        engine.reveal(None).unwrap();
        assert!(engine.board().cell_at(10).unwrap().is_cleared());
    }

    #[test]
    fn reveal_mine_loses_and_records_detonation() {
        let mut engine = engine(&[5]);

        let outcome = engine.reveal(Some(5)).unwrap();

        assert_eq!(outcome, RevealOutcome::Detonated);
        assert_eq!(engine.status(), GameStatus::Lost);
        assert_eq!(engine.detonated(), Some(5));
    }

    #[test]
    fn isolated_mine_detonates_alone() {
        let mut engine = engine(&[27, 63]);

        let snapshot = engine.dispatch(Intent::Reveal(Some(27))).unwrap();

        assert_eq!(snapshot.status, GameStatus::Lost);
        assert_eq!(snapshot.detonated, Some(27));
        assert_eq!(engine.board().cleared_count(), 1);
        assert!(snapshot.cells.iter().zip(0..CELL_COUNT).all(|(cell, index)| cell.is_cleared == (index == 27)));
    }

    #[test]
    fn finished_game_ignores_intents() {
        let mut engine = engine(&[5]);
        engine.reveal(Some(5)).unwrap();
        let before = engine.query_snapshot();

        assert_eq!(engine.reveal(Some(20)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine.toggle_flag(Some(20)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(engine.move_selection(Direction::Down), 0);
        assert_eq!(engine.query_snapshot(), before);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mut engine = engine(&[5]);

        assert_eq!(engine.reveal(Some(64)), Err(GameError::InvalidIndex));
        assert_eq!(engine.toggle_flag(Some(200)), Err(GameError::InvalidIndex));
        assert_eq!(engine.board().cleared_count(), 0);
    }

    #[test]
    fn reset_restores_a_fresh_game() {
        let mut engine = engine(&[5]);
        engine.move_selection(Direction::Up);
        engine.toggle_flag(Some(1)).unwrap();
        engine.reveal(Some(5)).unwrap();

        let snapshot = engine.new_game();

        assert_eq!(snapshot.status, GameStatus::Running);
        assert_eq!(snapshot.selected_index, 0);
        assert_eq!(snapshot.detonated, None);
        assert!(snapshot.cells.iter().all(|cell| !cell.is_cleared && !cell.is_flagged));
    }

    #[test]
    fn dispatch_returns_snapshot_after_intent() {
        let mut engine = engine(&[63]);

        let snapshot = engine.dispatch(Intent::Move(Direction::Up)).unwrap();
        assert_eq!(snapshot.selected_index, 56);

        let snapshot = engine.dispatch(Intent::ToggleFlag(None)).unwrap();
        assert_eq!(snapshot.cell(56).unwrap().hint, CellHint::Flag);

        let snapshot = engine.dispatch(Intent::Reveal(Some(0))).unwrap();
        assert_eq!(snapshot.status, GameStatus::Running);
        assert_eq!(snapshot.cell(56).unwrap().hint, CellHint::Flag);
        assert_eq!(snapshot.cell(0).unwrap().hint, CellHint::Clear);

        let snapshot = engine.dispatch(Intent::NewGame).unwrap();
        assert_eq!(snapshot.selected_index, 0);
        assert!(snapshot.hints().all(|hint| hint == CellHint::Blank));
    }
}
