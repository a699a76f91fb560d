//! Protocol module - JSON shapes for levels, commands, replies and events
//!
//! Every message is a single JSON object with a `type` tag. Commands may carry a
//! `seq` number which is echoed on the reply.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{AbilityError, BoardSnapshot, ConfigError, LevelConfig, MoveError};
use crate::engine::Hint;
use crate::types::{Pos, ResolutionEvent, ResolutionTrace, TileType};

// ============== Levels ==============

/// On-disk level description (camelCase keys).
///
/// `disabledSections` and `backLayout` may be omitted; a missing back layout is
/// all empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelFile {
    pub width: usize,
    pub height: usize,
    pub section_count: usize,
    #[serde(default)]
    pub disabled_sections: Vec<usize>,
    pub front_layout: Vec<i32>,
    #[serde(default)]
    pub back_layout: Vec<i32>,
}

impl From<LevelFile> for LevelConfig {
    fn from(file: LevelFile) -> Self {
        // Sized after the front layout; validation checks both against the board.
        let back_layout = if file.back_layout.is_empty() {
            vec![-1; file.front_layout.len()]
        } else {
            file.back_layout
        };
        LevelConfig {
            width: file.width,
            height: file.height,
            section_count: file.section_count,
            disabled_sections: file.disabled_sections,
            front_layout: file.front_layout,
            back_layout,
        }
    }
}

impl From<&LevelConfig> for LevelFile {
    fn from(level: &LevelConfig) -> Self {
        LevelFile {
            width: level.width,
            height: level.height,
            section_count: level.section_count,
            disabled_sections: level.disabled_sections.clone(),
            front_layout: level.front_layout.clone(),
            back_layout: level.back_layout.clone(),
        }
    }
}

/// Parse and validate a level from JSON text
pub fn parse_level(json: &str) -> anyhow::Result<LevelConfig> {
    let file: LevelFile = serde_json::from_str(json).context("malformed level file")?;
    let level = LevelConfig::from(file);
    level.validate().context("level rejected")?;
    Ok(level)
}

/// Read, parse and validate a level file
pub fn load_level(path: impl AsRef<Path>) -> anyhow::Result<LevelConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read level {}", path.display()))?;
    parse_level(&text).with_context(|| format!("in level {}", path.display()))
}

// ============== Shared shapes ==============

/// A board coordinate on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub x: usize,
    pub y: usize,
}

impl From<Pos> for CellRef {
    fn from(pos: Pos) -> Self {
        CellRef { x: pos.x, y: pos.y }
    }
}

impl From<CellRef> for Pos {
    fn from(cell: CellRef) -> Self {
        Pos::new(cell.x, cell.y)
    }
}

fn cell_refs(cells: &[Pos]) -> Vec<CellRef> {
    cells.iter().copied().map(CellRef::from).collect()
}

/// A tile laid down by a shuffle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub x: usize,
    pub y: usize,
    pub tile: u8,
}

/// Deterministic board hash serialized as 16 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardHash(pub u64);

impl Serialize for BoardHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        let mut buf = [0u8; 16];
        let mut v = self.0;
        for i in 0..16 {
            buf[15 - i] = HEX[(v & 0x0f) as usize];
            v >>= 4;
        }
        let s = std::str::from_utf8(&buf).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for BoardHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        u64::from_str_radix(s.trim(), 16)
            .map(BoardHash)
            .map_err(|_| serde::de::Error::custom("invalid hex"))
    }
}

// ============== Client -> Game ==============

/// A command from the collaborator driving the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Tap a cell (selection protocol)
    Select { x: usize, y: usize },
    /// Move a front tile directly, bypassing selection
    Move { from: CellRef, to: CellRef },
    /// Move the armed tile
    MoveSelection { x: usize, y: usize },
    RandomMatch,
    Shuffle,
    Snapshot,
    Restart,
    /// Ask for a move that would form a match
    Hint,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Select { .. } => "select",
            Command::Move { .. } => "move",
            Command::MoveSelection { .. } => "moveSelection",
            Command::RandomMatch => "randomMatch",
            Command::Shuffle => "shuffle",
            Command::Snapshot => "snapshot",
            Command::Restart => "restart",
            Command::Hint => "hint",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMessage {
    #[serde(default)]
    pub seq: u64,
    #[serde(flatten)]
    pub command: Command,
}

/// Parse one line of input
pub fn parse_command(json: &str) -> Result<CommandMessage, serde_json::Error> {
    serde_json::from_str(json.trim())
}

// ============== Game -> Client ==============

/// One resolution event on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventMessage {
    Shuffled {
        tiles: Vec<PlacedTile>,
    },
    TilesMatched {
        tile: u8,
        cells: Vec<CellRef>,
    },
    TilesPromoted {
        section: usize,
        row: usize,
        cells: Vec<CellRef>,
    },
    BoardQuiescent {
        #[serde(rename = "boardEmpty")]
        board_empty: bool,
    },
}

impl From<&ResolutionEvent> for EventMessage {
    fn from(event: &ResolutionEvent) -> Self {
        match event {
            ResolutionEvent::Shuffled { tiles } => EventMessage::Shuffled {
                tiles: tiles
                    .iter()
                    .map(|&(pos, tile)| PlacedTile {
                        x: pos.x,
                        y: pos.y,
                        tile: tile.id(),
                    })
                    .collect(),
            },
            ResolutionEvent::TilesMatched { tile, cells } => EventMessage::TilesMatched {
                tile: tile.id(),
                cells: cell_refs(cells),
            },
            ResolutionEvent::TilesPromoted { section, row, cells } => {
                EventMessage::TilesPromoted {
                    section: *section,
                    row: *row,
                    cells: cell_refs(cells),
                }
            }
            ResolutionEvent::BoardQuiescent { board_empty } => EventMessage::BoardQuiescent {
                board_empty: *board_empty,
            },
        }
    }
}

/// A whole resolution on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceBody {
    pub events: Vec<EventMessage>,
    pub passes: u32,
    pub board_empty: bool,
}

impl From<&ResolutionTrace> for TraceBody {
    fn from(trace: &ResolutionTrace) -> Self {
        TraceBody {
            events: trace.events.iter().map(EventMessage::from).collect(),
            passes: trace.passes,
            board_empty: trace.board_empty().unwrap_or(false),
        }
    }
}

/// Board state on the wire; layers use level-file encoding (`-1` = empty)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotBody {
    pub width: usize,
    pub height: usize,
    pub section_count: usize,
    pub disabled_sections: Vec<usize>,
    pub front: Vec<i32>,
    pub back: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<CellRef>,
    pub board_hash: BoardHash,
}

impl From<&BoardSnapshot> for SnapshotBody {
    fn from(snap: &BoardSnapshot) -> Self {
        SnapshotBody {
            width: snap.width,
            height: snap.height,
            section_count: snap.section_count,
            disabled_sections: snap.disabled_sections.clone(),
            front: snap.front.iter().map(|&c| TileType::to_layout(c)).collect(),
            back: snap.back.iter().map(|&c| TileType::to_layout(c)).collect(),
            selection: snap.selection.map(CellRef::from),
            board_hash: BoardHash(snap.board_hash),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionState {
    Idle,
    Armed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintBody {
    pub from: CellRef,
    pub to: CellRef,
    pub tile: u8,
}

impl From<Hint> for HintBody {
    fn from(hint: Hint) -> Self {
        HintBody {
            from: hint.from.into(),
            to: hint.to.into(),
            tile: hint.tile.id(),
        }
    }
}

/// The answer to one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Reply {
    Trace {
        #[serde(flatten)]
        trace: TraceBody,
    },
    Selection {
        state: SelectionState,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        armed: Option<CellRef>,
        /// Present when the selection triggered a move
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace: Option<TraceBody>,
    },
    Snapshot {
        snapshot: SnapshotBody,
    },
    Hint {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hint: Option<HintBody>,
    },
    Error {
        code: String,
        message: String,
    },
}

impl Reply {
    pub fn trace(trace: &ResolutionTrace) -> Self {
        Reply::Trace {
            trace: trace.into(),
        }
    }

    pub fn snapshot(snapshot: &BoardSnapshot) -> Self {
        Reply::Snapshot {
            snapshot: snapshot.into(),
        }
    }

    pub fn error(code: &str, message: impl ToString) -> Self {
        Reply::Error {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error { .. })
    }

    /// Error code, if this is an error reply
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Reply::Error { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<MoveError> for Reply {
    fn from(err: MoveError) -> Self {
        Reply::error(err.code(), err)
    }
}

impl From<AbilityError> for Reply {
    fn from(err: AbilityError) -> Self {
        Reply::error(err.code(), err)
    }
}

impl From<ConfigError> for Reply {
    fn from(err: ConfigError) -> Self {
        Reply::error(err.code(), err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyMessage {
    pub seq: u64,
    #[serde(flatten)]
    pub reply: Reply,
}
