use tile_match_core::{has_match, Board, MoveError, ResolutionEngine};
use tile_match_types::{Layer, Pos, ResolutionTrace, TileType};

/// A move that would form at least one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hint {
    pub from: Pos,
    pub to: Pos,
    pub tile: TileType,
}

/// Find the first move that forms a match.
///
/// Sources are tried row-major, and for each source the targets row-major. The
/// search runs on a scratch copy; `board` is never touched.
pub fn find_hint(board: &Board) -> Option<Hint> {
    let sources: Vec<(Pos, TileType)> = board.tiles(Layer::Front).collect();
    let targets: Vec<Pos> = board
        .playable_cells()
        .filter(|&pos| matches!(board.get(pos, Layer::Front), Some(None)))
        .collect();

    let mut scratch = board.clone();
    for &(from, tile) in &sources {
        for &to in &targets {
            if scratch.move_front_tile(from, to).is_err() {
                continue;
            }
            let found = has_match(&scratch);
            // Undo; both cells were just validated so this cannot fail.
            let _ = scratch.move_front_tile(to, from);
            if found {
                return Some(Hint { from, to, tile });
            }
        }
    }
    None
}

pub fn has_any_move_match(board: &Board) -> bool {
    find_hint(board).is_some()
}

/// Resolve a move on a copy of the engine and return what would happen
pub fn preview_move(
    engine: &ResolutionEngine,
    from: Pos,
    to: Pos,
) -> Result<ResolutionTrace, MoveError> {
    let mut copy = engine.clone();
    copy.submit_move(from, to)
}
