//! Hint search and step-player against real resolutions

use tile_match::core::{Game, LevelConfig};
use tile_match::engine::{find_hint, has_any_move_match, preview_move, PlayerTiming, TracePlayer};
use tile_match::types::{Pos, ResolutionEvent, MATCH_PAUSE_MS, PROMOTE_PAUSE_MS};

fn game(front: &[i32], back: &[i32]) -> Game {
    let mut level = LevelConfig::empty(front.len(), 1, 1);
    level.front_layout = front.to_vec();
    if !back.is_empty() {
        level.back_layout = back.to_vec();
    }
    Game::with_seed(level, 4).unwrap()
}

#[test]
fn test_following_the_hint_clears_tiles() {
    let mut g = game(&[1, 0, 0, -1, 0, 1, -1, -1], &[]);
    let hint = find_hint(g.board()).unwrap();

    let preview = preview_move(g.engine(), hint.from, hint.to).unwrap();
    let trace = g.submit_move(hint.from, hint.to).unwrap();
    assert_eq!(preview, trace);
    assert!(trace.cleared_count() >= 3);
}

#[test]
fn test_stuck_board_has_no_hint() {
    let g = game(&[0, 1, 0, 1, -1, -1], &[]);
    assert!(!has_any_move_match(g.board()));
}

#[test]
fn test_preview_reports_errors() {
    let g = game(&[0, -1, -1], &[]);
    assert!(preview_move(g.engine(), Pos::new(1, 0), Pos::new(2, 0)).is_err());
}

#[test]
fn test_player_paces_a_cascade() {
    let mut g = game(&[0, 0, -1, 0, -1, -1], &[1, 1, 1, -1, -1, -1]);
    let trace = g.submit_move(Pos::new(3, 0), Pos::new(2, 0)).unwrap();
    assert_eq!(trace.events.len(), 4);

    let mut player = TracePlayer::new(PlayerTiming::default());
    player.enqueue(&trace);

    let mut clock = 0u32;
    let mut released = Vec::new();
    while !player.is_idle() {
        if let Some(step) = player.tick(10) {
            released.push((clock, step.event));
        }
        clock += 10;
    }

    let kinds: Vec<&str> = released.iter().map(|(_, e)| e.as_str()).collect();
    assert_eq!(
        kinds,
        vec!["tilesMatched", "tilesPromoted", "tilesMatched", "boardQuiescent"]
    );
    let starts: Vec<u32> = released.iter().map(|(t, _)| *t).collect();
    assert_eq!(
        starts,
        vec![
            0,
            MATCH_PAUSE_MS,
            MATCH_PAUSE_MS + PROMOTE_PAUSE_MS,
            2 * MATCH_PAUSE_MS + PROMOTE_PAUSE_MS,
        ]
    );
    assert!(matches!(
        released[3].1,
        ResolutionEvent::BoardQuiescent { board_empty: true }
    ));
}

#[test]
fn test_player_queues_traces_back_to_back() {
    let mut g = game(&[0, 0, -1, 0, 1, 1, -1, 1], &[]);
    let first = g.submit_move(Pos::new(3, 0), Pos::new(2, 0)).unwrap();
    let second = g.submit_move(Pos::new(7, 0), Pos::new(6, 0)).unwrap();

    let mut player = TracePlayer::new(PlayerTiming::INSTANT);
    player.enqueue(&first);
    player.enqueue(&second);
    assert_eq!(player.pending(), first.events.len() + second.events.len());

    let mut count = 0;
    while player.tick(0).is_some() {
        count += 1;
    }
    assert_eq!(count, 4);
}
