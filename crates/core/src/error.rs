//! Error taxonomy for board mutations, moves, abilities and level loading.
//!
//! All errors are local and recoverable: a call that returns one of these has
//! left the board, selection and resolution phase exactly as they were.

use thiserror::Error;

use crate::types::{Layer, Pos};

/// Precondition failures of [`Board`](crate::Board) mutators and queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("coordinate {0} is outside the board or in a disabled section")]
    InvalidCoordinate(Pos),

    #[error("cell {0} is already occupied")]
    CellOccupied(Pos),

    #[error("cell {0} is empty")]
    CellNotOccupied(Pos),
}

impl BoardError {
    pub fn code(self) -> &'static str {
        match self {
            BoardError::InvalidCoordinate(_) => "invalid_coordinate",
            BoardError::CellOccupied(_) => "cell_occupied",
            BoardError::CellNotOccupied(_) => "cell_not_occupied",
        }
    }
}

/// Rejections of a move request or a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("coordinate {0} is outside the board or in a disabled section")]
    InvalidCoordinate(Pos),

    #[error("cell {0} is already occupied")]
    CellOccupied(Pos),

    #[error("cell {0} is empty")]
    CellNotOccupied(Pos),

    #[error("no tile is selected")]
    NoSelectionActive,

    #[error("a resolution is still in progress")]
    ResolutionInProgress,
}

impl MoveError {
    pub fn code(self) -> &'static str {
        match self {
            MoveError::InvalidCoordinate(_) => "invalid_coordinate",
            MoveError::CellOccupied(_) => "cell_occupied",
            MoveError::CellNotOccupied(_) => "cell_not_occupied",
            MoveError::NoSelectionActive => "no_selection_active",
            MoveError::ResolutionInProgress => "resolution_in_progress",
        }
    }
}

impl From<BoardError> for MoveError {
    fn from(value: BoardError) -> Self {
        match value {
            BoardError::InvalidCoordinate(pos) => MoveError::InvalidCoordinate(pos),
            BoardError::CellOccupied(pos) => MoveError::CellOccupied(pos),
            BoardError::CellNotOccupied(pos) => MoveError::CellNotOccupied(pos),
        }
    }
}

/// Reasons an ability attempt did nothing. The caller's budget is not consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AbilityError {
    #[error("no tile type has enough tiles on the front layer")]
    NoQualifyingType,

    #[error("a resolution is still in progress")]
    ResolutionInProgress,
}

impl AbilityError {
    pub fn code(self) -> &'static str {
        match self {
            AbilityError::NoQualifyingType | AbilityError::ResolutionInProgress => {
                "ability_unavailable"
            }
        }
    }
}

/// A level configuration that cannot be turned into a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board dimensions must be non-zero (got {width}x{height}, {section_count} sections)")]
    ZeroDimension {
        width: usize,
        height: usize,
        section_count: usize,
    },

    #[error("board of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },

    #[error("width {width} is not divisible by section count {section_count}")]
    WidthNotDivisible { width: usize, section_count: usize },

    #[error("disabled section {section} is out of range (section count {section_count})")]
    SectionOutOfRange { section: usize, section_count: usize },

    #[error("{} layout has {actual} cells, expected {expected}", .layer.as_str())]
    LayoutLength {
        layer: Layer,
        expected: usize,
        actual: usize,
    },

    #[error("{} layout holds invalid tile value {value} at {pos}", .layer.as_str())]
    InvalidTileValue { layer: Layer, pos: Pos, value: i32 },

    #[error("{} layout places a tile at {pos} inside a disabled section", .layer.as_str())]
    TileInDisabledSection { layer: Layer, pos: Pos },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        "invalid_level"
    }
}
