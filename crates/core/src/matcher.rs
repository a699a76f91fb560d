//! Match finder - horizontal runs of identical front tiles
//!
//! A match is a maximal run of at least [`MIN_MATCH_LEN`] equal tile types on the
//! front layer, inside one section-row. Empty cells and section edges end a run.
//! Groups come out row-major: top row first, then sections left to right, then
//! runs left to right within a section.

use crate::board::Board;
use crate::types::{Layer, MatchGroup, Pos, TileType, MIN_MATCH_LEN};

/// Find every match group on the board. Pure and deterministic.
pub fn find_matches(board: &Board) -> Vec<MatchGroup> {
    let mut groups = Vec::new();
    for y in 0..board.height() {
        for section in board.enabled_sections() {
            scan_section_row(board, section, y, &mut groups);
        }
    }
    groups
}

/// Check whether the board holds at least one match group
pub fn has_match(board: &Board) -> bool {
    (0..board.height()).any(|y| {
        board.enabled_sections().any(|section| {
            let mut groups = Vec::new();
            scan_section_row(board, section, y, &mut groups);
            !groups.is_empty()
        })
    })
}

fn scan_section_row(board: &Board, section: usize, y: usize, out: &mut Vec<MatchGroup>) {
    let row = &board.cells(Layer::Front)[y * board.width()..(y + 1) * board.width()];
    let columns = board.section_columns(section);

    let mut run: Option<(TileType, usize)> = None;
    for x in columns.clone() {
        match (run, row[x]) {
            (Some((tile, _)), Some(cell)) if tile == cell => {}
            (_, cell) => {
                if let Some((tile, start)) = run {
                    push_run(out, tile, section, y, start, x);
                }
                run = cell.map(|tile| (tile, x));
            }
        }
    }
    if let Some((tile, start)) = run {
        push_run(out, tile, section, y, start, columns.end);
    }
}

fn push_run(
    out: &mut Vec<MatchGroup>,
    tile: TileType,
    section: usize,
    row: usize,
    start: usize,
    end: usize,
) {
    if end - start < MIN_MATCH_LEN {
        return;
    }
    out.push(MatchGroup {
        tile,
        section,
        row,
        cells: (start..end).map(|x| Pos::new(x, row)).collect(),
    });
}
