//! Special abilities - forced random match and front-layer shuffle
//!
//! Both abilities change the board directly and then hand the rest of the work
//! to the resolution engine, so their cascades look exactly like a move's.
//! Randomness is always injected; the same seed replays the same outcome.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::error::AbilityError;
use crate::resolve::{Phase, ResolutionEngine};
use crate::types::{
    Layer, Pos, ResolutionEvent, ResolutionTrace, TileType, RANDOM_MATCH_SIZE,
};

/// Front-layer occurrences of every tile type, ascending by type, cells row-major
fn occurrences(engine: &ResolutionEngine) -> BTreeMap<TileType, Vec<Pos>> {
    let mut by_type: BTreeMap<TileType, Vec<Pos>> = BTreeMap::new();
    for (pos, tile) in engine.board().tiles(Layer::Front) {
        by_type.entry(tile).or_default().push(pos);
    }
    by_type
}

/// Tile types with at least [`RANDOM_MATCH_SIZE`] tiles on the front layer
pub fn random_match_candidates(engine: &ResolutionEngine) -> Vec<TileType> {
    occurrences(engine)
        .into_iter()
        .filter(|(_, cells)| cells.len() >= RANDOM_MATCH_SIZE)
        .map(|(tile, _)| tile)
        .collect()
}

/// Clear three random front tiles of one random qualifying type, then cascade.
///
/// Fails without touching anything when no type has three tiles on the front
/// layer. The three cells need not be adjacent; they are reported row-major.
pub fn random_match<R: Rng + ?Sized>(
    engine: &mut ResolutionEngine,
    rng: &mut R,
) -> Result<ResolutionTrace, AbilityError> {
    if !engine.is_quiescent() {
        return Err(AbilityError::ResolutionInProgress);
    }

    let mut qualifying: Vec<(TileType, Vec<Pos>)> = occurrences(engine)
        .into_iter()
        .filter(|(_, cells)| cells.len() >= RANDOM_MATCH_SIZE)
        .collect();
    if qualifying.is_empty() {
        return Err(AbilityError::NoQualifyingType);
    }

    let (tile, cells) = qualifying.swap_remove(rng.gen_range(0..qualifying.len()));
    let mut picked: ArrayVec<Pos, RANDOM_MATCH_SIZE> =
        index::sample(rng, cells.len(), RANDOM_MATCH_SIZE)
            .into_iter()
            .map(|i| cells[i])
            .collect();
    picked.sort_by_key(|p| (p.y, p.x));

    let board = engine.board_mut();
    for &pos in &picked {
        let cleared = board.set(pos, Layer::Front, None);
        debug_assert!(cleared, "picked cell {pos} is not playable");
    }

    let cleared = ResolutionEvent::TilesMatched {
        tile,
        cells: picked.to_vec(),
    };
    engine.begin_with(Phase::Promoting, vec![cleared], 1);
    Ok(engine.run_to_quiescence())
}

/// Redistribute the front layer across every playable cell, then cascade.
///
/// The front tile types are shuffled and laid back down, in row-major order,
/// over every cell of the enabled sections; cells past the last tile end up
/// empty. With fewer than two front tiles this is a no-op that still reports
/// the (unchanged) quiescent state.
pub fn shuffle<R: Rng + ?Sized>(
    engine: &mut ResolutionEngine,
    rng: &mut R,
) -> Result<ResolutionTrace, AbilityError> {
    if !engine.is_quiescent() {
        return Err(AbilityError::ResolutionInProgress);
    }

    if engine.board().tile_count(Layer::Front) < 2 {
        let mut trace = ResolutionTrace::new();
        trace.push(ResolutionEvent::BoardQuiescent {
            board_empty: engine.board().is_board_empty(),
        });
        return Ok(trace);
    }

    let targets: Vec<Pos> = engine.board().playable_cells().collect();
    let board = engine.board_mut();
    let mut tiles = board.drain_front();
    tiles.shuffle(rng);

    let mut layout = Vec::with_capacity(tiles.len());
    for (pos, tile) in targets.into_iter().zip(tiles) {
        let placed = board.set(pos, Layer::Front, Some(tile));
        debug_assert!(placed, "shuffle target {pos} is not playable");
        layout.push((pos, tile));
    }

    engine.begin_with(
        Phase::Matching,
        vec![ResolutionEvent::Shuffled { tiles: layout }],
        0,
    );
    Ok(engine.run_to_quiescence())
}
