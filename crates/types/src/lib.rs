//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core rules, presentation, JSON protocol).
//!
//! # Board Model
//!
//! A board is `width x height` cells, split into `section_count` vertical
//! sections of equal width. Every cell has two layers:
//!
//! - **Front**: visible tiles that can be moved and matched
//! - **Back**: hidden tiles, promoted to the front when their section-row empties
//!
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//!
//! # Presentation Timing Constants
//!
//! The rules engine has no timing. These defaults are used by the step-player
//! that paces a [`ResolutionTrace`] for a renderer:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SHUFFLE_PAUSE_MS` | 300 | Hold after the board is reshuffled |
//! | `MATCH_PAUSE_MS` | 250 | Hold after a group is cleared |
//! | `PROMOTE_PAUSE_MS` | 200 | Hold after a back row slides forward |
//! | `QUIESCENT_PAUSE_MS` | 0 | Hold after the board settles |
//!
//! # Examples
//!
//! ```
//! use tile_match_types::{Layer, TileType, EMPTY_LAYOUT_VALUE};
//!
//! let layer = Layer::from_str("back").unwrap();
//! assert_eq!(layer, Layer::Back);
//! assert_eq!(layer.as_str(), "back");
//!
//! let tile = TileType::from_layout(2).unwrap();
//! assert_eq!(tile, Some(TileType(2)));
//! assert_eq!(TileType::from_layout(EMPTY_LAYOUT_VALUE), Some(None));
//! assert_eq!(TileType::from_layout(-7), None);
//! ```

use std::fmt;

/// Minimum length of a horizontal run that counts as a match (3)
pub const MIN_MATCH_LEN: usize = 3;

/// Number of tiles a forced random match clears (3)
pub const RANDOM_MATCH_SIZE: usize = 3;

/// Layout value that marks an empty cell in a level configuration
pub const EMPTY_LAYOUT_VALUE: i32 = -1;

/// Hold after a shuffle is shown (300ms)
pub const SHUFFLE_PAUSE_MS: u32 = 300;

/// Hold after a matched group is cleared (250ms)
pub const MATCH_PAUSE_MS: u32 = 250;

/// Hold after a back row is promoted (200ms)
pub const PROMOTE_PAUSE_MS: u32 = 200;

/// Hold after the board settles (0ms)
pub const QUIESCENT_PAUSE_MS: u32 = 0;

/// A tile type id (small enumerated value, e.g. 0..5)
///
/// Tiles carry no identity beyond their cell and layer; moving a tile moves
/// this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileType(pub u8);

impl TileType {
    /// Decode a level-layout value.
    ///
    /// Returns `Some(None)` for [`EMPTY_LAYOUT_VALUE`], `Some(Some(tile))` for
    /// `0..=255`, and `None` for anything else.
    pub fn from_layout(value: i32) -> Option<Cell> {
        if value == EMPTY_LAYOUT_VALUE {
            return Some(None);
        }
        u8::try_from(value).ok().map(|id| Some(TileType(id)))
    }

    /// Encode a cell back into a level-layout value
    pub fn to_layout(cell: Cell) -> i32 {
        match cell {
            Some(TileType(id)) => id as i32,
            None => EMPTY_LAYOUT_VALUE,
        }
    }

    pub fn id(self) -> u8 {
        self.0
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A cell on one layer of the board
///
/// - `None`: Empty cell
/// - `Some(TileType)`: Cell holding a tile of that type
pub type Cell = Option<TileType>;

/// The two stacked layers of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Front,
    Back,
}

impl Layer {
    pub const ALL: [Layer; 2] = [Layer::Front, Layer::Back];

    /// Parse layer from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "front" | "f" => Some(Layer::Front),
            "back" | "b" => Some(Layer::Back),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Front => "front",
            Layer::Back => "back",
        }
    }
}

/// A board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Pos {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A maximal horizontal run of identical front-layer tiles inside one section-row.
///
/// `cells` are ordered left to right and always share `row`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchGroup {
    pub tile: TileType,
    pub section: usize,
    pub row: usize,
    pub cells: Vec<Pos>,
}

impl MatchGroup {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One step of a resolution, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolutionEvent {
    /// The front layer was redistributed; `tiles` is the new layout.
    Shuffled { tiles: Vec<(Pos, TileType)> },
    /// A group of tiles was cleared from the front layer.
    TilesMatched { tile: TileType, cells: Vec<Pos> },
    /// Back-layer tiles of one section-row moved to the front layer.
    TilesPromoted { section: usize, row: usize, cells: Vec<Pos> },
    /// No matches and no promotions remain. Always the last event.
    BoardQuiescent { board_empty: bool },
}

impl ResolutionEvent {
    /// Event name used on the wire (camelCase)
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionEvent::Shuffled { .. } => "shuffled",
            ResolutionEvent::TilesMatched { .. } => "tilesMatched",
            ResolutionEvent::TilesPromoted { .. } => "tilesPromoted",
            ResolutionEvent::BoardQuiescent { .. } => "boardQuiescent",
        }
    }
}

/// Ordered, finite record of everything one move or ability did to the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResolutionTrace {
    pub events: Vec<ResolutionEvent>,
    /// Number of clear passes (match or forced clear) that ran.
    pub passes: u32,
}

impl ResolutionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ResolutionEvent) {
        self.events.push(event);
    }

    /// Iterate over the groups cleared by this resolution
    pub fn matches(&self) -> impl Iterator<Item = (TileType, &[Pos])> + '_ {
        self.events.iter().filter_map(|e| match e {
            ResolutionEvent::TilesMatched { tile, cells } => Some((*tile, cells.as_slice())),
            _ => None,
        })
    }

    /// Total tiles removed from the board
    pub fn cleared_count(&self) -> usize {
        self.matches().map(|(_, cells)| cells.len()).sum()
    }

    /// Total back-layer tiles promoted
    pub fn promoted_count(&self) -> usize {
        self.events
            .iter()
            .map(|e| match e {
                ResolutionEvent::TilesPromoted { cells, .. } => cells.len(),
                _ => 0,
            })
            .sum()
    }

    /// `board_empty` from the terminal event, if the trace reached quiescence
    pub fn board_empty(&self) -> Option<bool> {
        match self.events.last() {
            Some(ResolutionEvent::BoardQuiescent { board_empty }) => Some(*board_empty),
            _ => None,
        }
    }

    pub fn is_quiescent(&self) -> bool {
        self.board_empty().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_values_decode() {
        assert_eq!(TileType::from_layout(-1), Some(None));
        assert_eq!(TileType::from_layout(0), Some(Some(TileType(0))));
        assert_eq!(TileType::from_layout(255), Some(Some(TileType(255))));
        assert_eq!(TileType::from_layout(256), None);
        assert_eq!(TileType::from_layout(-2), None);
        assert_eq!(TileType::to_layout(None), -1);
        assert_eq!(TileType::to_layout(Some(TileType(4))), 4);
    }

    #[test]
    fn layer_parse() {
        assert_eq!(Layer::from_str("FRONT"), Some(Layer::Front));
        assert_eq!(Layer::from_str("b"), Some(Layer::Back));
        assert_eq!(Layer::from_str("middle"), None);
    }

    #[test]
    fn trace_summaries() {
        let mut trace = ResolutionTrace::new();
        trace.push(ResolutionEvent::TilesMatched {
            tile: TileType(1),
            cells: vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(2, 0)],
        });
        trace.push(ResolutionEvent::TilesPromoted {
            section: 0,
            row: 0,
            cells: vec![Pos::new(0, 0), Pos::new(2, 0)],
        });
        assert!(!trace.is_quiescent());
        trace.push(ResolutionEvent::BoardQuiescent { board_empty: false });

        assert_eq!(trace.cleared_count(), 3);
        assert_eq!(trace.promoted_count(), 2);
        assert_eq!(trace.board_empty(), Some(false));
        assert_eq!(trace.matches().count(), 1);
    }
}
