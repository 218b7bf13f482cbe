use pocketsweep_core::*;

const MINES_AT_BOTTOM: [CellIndex; 10] = [54, 55, 56, 57, 58, 59, 60, 61, 62, 63];

fn engine_with_mines(mines: &[CellIndex]) -> GameEngine<FixedLayoutGenerator> {
    let layout = MineLayout::from_mine_indices(mines).unwrap();
    GameEngine::with_layout(EngineConfig::default(), layout)
}

fn assert_board_consistent(board: &Board) {
    assert_eq!(board.mine_layout().iter_mines().count(), usize::from(board.mine_total()));
    for (index, cell) in board.iter_cells() {
        if let CellState::Cleared(count) = cell {
            let expected = board
                .neighbors(index)
                .unwrap()
                .filter(|&pos| board.has_mine(pos).unwrap())
                .count();
            assert_eq!(usize::from(count), expected, "threat count of cell {index}");
        }
    }
    let flagged = board.iter_cells().filter(|(_, cell)| cell.is_flagged()).count();
    let cleared = board.iter_cells().filter(|(_, cell)| cell.is_cleared()).count();
    assert_eq!(usize::from(board.flagged_count()), flagged);
    assert_eq!(usize::from(board.cleared_count()), cleared);
}

#[test]
fn generated_boards_always_have_ten_mines() {
    let mut engine = GameEngine::new(EngineConfig::new(2024));
    for _ in 0..10_000 {
        assert_eq!(engine.board().mine_total(), MINE_TOTAL);
        assert_eq!(engine.board().mine_layout().iter_mines().count(), 10);
        engine.reset_game();
    }
}

#[test]
fn same_seed_replays_the_same_games() {
    let mut a = GameEngine::new(EngineConfig::new(77));
    let mut b = GameEngine::new(EngineConfig::new(77));
    for _ in 0..5 {
        assert_eq!(a.board(), b.board());
        a.reset_game();
        b.reset_game();
    }

    let c = GameEngine::new(EngineConfig::new(78));
    assert_ne!(a.board().mine_layout(), c.board().mine_layout());
}

#[test]
fn threat_counts_stay_consistent_during_play() {
    for seed in 0..50 {
        let mut engine = GameEngine::new(EngineConfig::new(seed));
        let mut index: CellIndex = 0;
        for _ in 0..200 {
            if !engine.status().is_running() {
                break;
            }
            index = (index + 37) % CELL_COUNT;
            if index % 5 == 0 {
                engine.toggle_flag(Some(index)).unwrap();
            } else {
                engine.reveal(Some(index)).unwrap();
            }
            assert_board_consistent(engine.board());
        }
    }
}

#[test]
fn second_reveal_is_a_no_op() {
    let mut engine = engine_with_mines(&MINES_AT_BOTTOM);
    engine.reveal(Some(45)).unwrap();
    let first = engine.query_snapshot();

    assert_eq!(engine.reveal(Some(45)).unwrap(), RevealOutcome::NoChange);
    assert_eq!(engine.query_snapshot(), first);
}

#[test]
fn cascade_on_mine_free_board_clears_everything() {
    let mut engine = engine_with_mines(&[]);

    assert_eq!(engine.reveal(Some(30)).unwrap(), RevealOutcome::Won);
    assert_eq!(engine.board().cleared_count(), CELL_COUNT);
}

#[test]
fn clearing_every_safe_cell_wins() {
    let mut engine = engine_with_mines(&MINES_AT_BOTTOM);

    assert_eq!(engine.reveal(Some(0)).unwrap(), RevealOutcome::Won);
    assert_eq!(engine.status(), GameStatus::Won);
    assert_eq!(engine.board().cleared_count(), 54);

    let snapshot = engine.query_snapshot();
    assert!(snapshot.visible_mines().eq(MINES_AT_BOTTOM));
    // threat numbers are hidden on the win screen
    assert!(snapshot.cells[..54].iter().all(|cell| cell.hint == CellHint::Blank));
}

#[test]
fn mine_on_the_last_reveal_loses_instead_of_winning() {
    let mut engine = engine_with_mines(&MINES_AT_BOTTOM);
    engine.toggle_flag(Some(53)).unwrap();

    assert_eq!(engine.reveal(Some(0)).unwrap(), RevealOutcome::Cleared);
    assert_eq!(engine.board().cleared_count(), 53);

    assert_eq!(engine.reveal(Some(54)).unwrap(), RevealOutcome::Detonated);
    assert_eq!(engine.status(), GameStatus::Lost);
}

#[test]
fn unflagging_and_revealing_the_last_safe_cell_wins() {
    let mut engine = engine_with_mines(&MINES_AT_BOTTOM);
    engine.toggle_flag(Some(53)).unwrap();
    engine.reveal(Some(0)).unwrap();

    assert_eq!(engine.reveal(Some(53)).unwrap(), RevealOutcome::NoChange);
    engine.toggle_flag(Some(53)).unwrap();
    assert_eq!(engine.reveal(Some(53)).unwrap(), RevealOutcome::Won);
}

#[test]
fn detonating_shows_all_ten_mines() {
    let mines = [5, 12, 20, 27, 33, 40, 41, 50, 58, 63];
    let mut engine = engine_with_mines(&mines);

    engine.reveal(Some(5)).unwrap();

    assert_eq!(engine.status(), GameStatus::Lost);
    let snapshot = engine.query_snapshot();
    assert_eq!(snapshot.visible_mines().count(), 10);
    assert!(snapshot.visible_mines().eq(mines));
    assert_eq!(snapshot.detonated, Some(5));
    assert!(
        snapshot
            .cells
            .iter()
            .filter(|cell| cell.has_mine == Some(false))
            .all(|cell| cell.hint == CellHint::Blank)
    );
}

#[test]
fn selection_wraps_from_top_right_to_bottom() {
    let mut engine = engine_with_mines(&MINES_AT_BOTTOM);
    for _ in 0..7 {
        engine.move_selection(Direction::Right);
    }
    assert_eq!(engine.selected_index(), 7);

    assert_eq!(engine.move_selection(Direction::Up), 63);
    assert_eq!(engine.move_selection(Direction::Down), 7);
    assert_eq!(engine.board().cleared_count(), 0);
}

#[test]
fn selection_stays_on_board() {
    let mut engine = engine_with_mines(&MINES_AT_BOTTOM);
    let directions = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
    for step in 0..500 {
        let index = engine.move_selection(directions[step * 7 % 4]);
        assert!(index < CELL_COUNT);
    }
}

#[test]
fn flags_and_clears_exclude_each_other() {
    let mut engine = engine_with_mines(&MINES_AT_BOTTOM);

    engine.reveal(Some(47)).unwrap();
    let before = engine.query_snapshot();
    assert_eq!(engine.toggle_flag(Some(47)).unwrap(), MarkOutcome::NoChange);
    assert_eq!(engine.query_snapshot(), before);

    assert_eq!(engine.toggle_flag(Some(46)).unwrap(), MarkOutcome::Changed);
    assert_eq!(engine.reveal(Some(46)).unwrap(), RevealOutcome::NoChange);
    assert_eq!(engine.board().cell_at(46), Ok(CellState::Flagged));

    engine.toggle_flag(Some(46)).unwrap();
    assert_eq!(engine.reveal(Some(46)).unwrap(), RevealOutcome::Cleared);
    assert!(engine.board().cell_at(46).unwrap().is_cleared());
}

#[test]
fn sweeping_cascade_overrides_flags() {
    let layout = MineLayout::from_mine_indices(&MINES_AT_BOTTOM).unwrap();
    let config = EngineConfig::default().with_cascade_flags(CascadeFlags::Sweep);
    let mut engine = GameEngine::with_layout(config, layout);
    engine.toggle_flag(Some(53)).unwrap();

    assert_eq!(engine.reveal(Some(0)).unwrap(), RevealOutcome::Won);
    assert_eq!(engine.mines_left(), 10);
}
