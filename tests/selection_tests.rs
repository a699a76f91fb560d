//! Selection protocol tests, driven through a `Game`

use std::sync::{Arc, Mutex};

use tile_match::core::{Game, LevelConfig, MoveError, Selection, SelectionOutcome};
use tile_match::types::{Layer, Pos, ResolutionTrace, TileType};

fn game(sections: usize, front: &[&str], back: &[&str]) -> Game {
    let decode = |rows: &[&str]| -> Vec<i32> {
        rows.iter()
            .flat_map(|r| r.bytes())
            .map(|b| match b {
                b'A'..=b'Z' => (b - b'A') as i32,
                _ => -1,
            })
            .collect()
    };
    let mut level = LevelConfig::empty(front[0].len(), front.len(), sections);
    level.front_layout = decode(front);
    if !back.is_empty() {
        level.back_layout = decode(back);
    }
    Game::with_seed(level, 1).unwrap()
}

#[test]
fn test_select_empty_while_idle_is_rejected_noop() {
    let mut g = game(1, &["A-----"], &[]);
    let before = g.snapshot();
    assert_eq!(g.select(Pos::new(3, 0)), Ok(SelectionOutcome::Idle));
    assert_eq!(g.current_selection(), Selection::Idle);
    assert_eq!(g.snapshot(), before);
}

#[test]
fn test_full_selection_cycle() {
    let mut g = game(1, &["AAB------"], &[]);

    assert_eq!(
        g.select(Pos::new(2, 0)),
        Ok(SelectionOutcome::Armed(Pos::new(2, 0)))
    );
    // Re-arm on another tile: no move.
    assert_eq!(
        g.select(Pos::new(0, 0)),
        Ok(SelectionOutcome::Armed(Pos::new(0, 0)))
    );
    assert_eq!(g.board().tile_count(Layer::Front), 3);

    // Far, non-adjacent target.
    let outcome = g.select(Pos::new(8, 0)).unwrap();
    let SelectionOutcome::MoveTriggered { from, to, trace } = outcome else {
        panic!("expected a move, got {outcome:?}");
    };
    assert_eq!((from, to), (Pos::new(0, 0), Pos::new(8, 0)));
    assert_eq!(trace.cleared_count(), 0);
    assert_eq!(g.current_selection(), Selection::Idle);
    assert_eq!(g.tile_at(Pos::new(8, 0), Layer::Front), Ok(Some(TileType(0))));
}

#[test]
fn test_deselect_same_cell() {
    let mut g = game(1, &["A--"], &[]);
    g.select(Pos::new(0, 0)).unwrap();
    assert_eq!(g.select(Pos::new(0, 0)), Ok(SelectionOutcome::Idle));
    assert!(g.current_selection().is_idle());
}

#[test]
fn test_disabled_section_cannot_be_targeted() {
    let mut front = LevelConfig::empty(6, 1, 2);
    front.disabled_sections = vec![1];
    front.front_layout[0] = 0;
    let mut g = Game::with_seed(front, 1).unwrap();

    g.select(Pos::new(0, 0)).unwrap();
    assert_eq!(
        g.select(Pos::new(3, 0)),
        Err(MoveError::InvalidCoordinate(Pos::new(3, 0)))
    );
    assert_eq!(g.current_selection(), Selection::Armed(Pos::new(0, 0)));
    assert_eq!(
        g.move_selection(Pos::new(5, 0)),
        Err(MoveError::InvalidCoordinate(Pos::new(5, 0)))
    );
    assert_eq!(g.current_selection(), Selection::Armed(Pos::new(0, 0)));
}

#[test]
fn test_move_selection_into_occupied_cell_keeps_selection() {
    let mut g = game(1, &["AB-"], &[]);
    g.select(Pos::new(0, 0)).unwrap();
    assert_eq!(
        g.move_selection(Pos::new(1, 0)),
        Err(MoveError::CellOccupied(Pos::new(1, 0)))
    );
    assert_eq!(g.current_selection(), Selection::Armed(Pos::new(0, 0)));
}

#[test]
fn test_selection_snapshot_and_sink() {
    let traces: Arc<Mutex<Vec<ResolutionTrace>>> = Arc::default();
    let mut g = game(1, &["AA-A--"], &["BBB---"]);
    let sink = Arc::clone(&traces);
    g.set_sink(Box::new(move |t: &ResolutionTrace| {
        sink.lock().unwrap().push(t.clone());
    }));

    g.select(Pos::new(3, 0)).unwrap();
    assert_eq!(g.snapshot().selection, Some(Pos::new(3, 0)));

    g.select(Pos::new(2, 0)).unwrap();
    assert_eq!(g.snapshot().selection, None);

    let traces = traces.lock().unwrap();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].cleared_count(), 6);
    assert_eq!(traces[0].promoted_count(), 3);
    assert!(g.is_board_empty());
}

#[test]
fn test_restart_clears_selection() {
    let mut g = game(1, &["AA-A--"], &[]);
    g.select(Pos::new(0, 0)).unwrap();
    g.restart().unwrap();
    assert!(g.current_selection().is_idle());
    assert_eq!(g.board().tile_count(Layer::Front), 3);
}
