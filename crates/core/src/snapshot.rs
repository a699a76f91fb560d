use crate::board::Board;
use crate::types::{Cell, Layer, Pos};

/// Read-only copy of a board for observers and renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    pub section_count: usize,
    pub disabled_sections: Vec<usize>,
    /// Row-major front layer
    pub front: Vec<Cell>,
    /// Row-major back layer
    pub back: Vec<Cell>,
    pub selection: Option<Pos>,
    /// FNV-1a over both layers (front first, empty = 0, tile = id + 1)
    pub board_hash: u64,
}

impl BoardSnapshot {
    pub fn capture(board: &Board, selection: Option<Pos>) -> Self {
        let mut s = Self::default();
        s.capture_into(board, selection);
        s
    }

    /// Refresh this snapshot in place, reusing its buffers
    pub fn capture_into(&mut self, board: &Board, selection: Option<Pos>) {
        self.width = board.width();
        self.height = board.height();
        self.section_count = board.section_count();
        self.disabled_sections.clear();
        self.disabled_sections.extend(board.disabled_sections());
        self.front.clear();
        self.front.extend_from_slice(board.cells(Layer::Front));
        self.back.clear();
        self.back.extend_from_slice(board.cells(Layer::Back));
        self.selection = selection;
        self.board_hash = board_hash(board);
    }

    pub fn cell(&self, pos: Pos, layer: Layer) -> Option<Cell> {
        if pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        let cells = match layer {
            Layer::Front => &self.front,
            Layer::Back => &self.back,
        };
        cells.get(pos.y * self.width + pos.x).copied()
    }
}

/// FNV-1a 64-bit hash of both layers
pub fn board_hash(board: &Board) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for cell in board
        .cells(Layer::Front)
        .iter()
        .chain(board.cells(Layer::Back))
    {
        let byte = cell.map_or(0u64, |t| t.0 as u64 + 1);
        h ^= byte;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}
