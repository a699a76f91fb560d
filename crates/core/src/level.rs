//! Level configuration - the opaque input a board is rebuilt from
//!
//! Layout arrays are row-major, `width * height` long, and use `-1` for an
//! empty cell. Everything that could corrupt the board later is rejected here,
//! at load time.

use crate::board::Board;
use crate::error::ConfigError;
use crate::types::{Layer, Pos, TileType};

/// Structure of one level as supplied by the level-asset collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelConfig {
    pub width: usize,
    pub height: usize,
    pub section_count: usize,
    pub disabled_sections: Vec<usize>,
    pub front_layout: Vec<i32>,
    pub back_layout: Vec<i32>,
}

impl LevelConfig {
    /// An empty level of the given shape
    pub fn empty(width: usize, height: usize, section_count: usize) -> Self {
        Self {
            width,
            height,
            section_count,
            disabled_sections: Vec::new(),
            front_layout: vec![-1; width * height],
            back_layout: vec![-1; width * height],
        }
    }

    /// Check the configuration without building a board
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build().map(|_| ())
    }

    /// Build a fresh board from this configuration
    pub fn build(&self) -> Result<Board, ConfigError> {
        let layers = [
            (Layer::Front, &self.front_layout),
            (Layer::Back, &self.back_layout),
        ];

        // Layout lengths are checked before the board allocates anything.
        let expected = self
            .width
            .checked_mul(self.height)
            .ok_or(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
            })?;
        for (layer, layout) in layers {
            if layout.len() != expected {
                return Err(ConfigError::LayoutLength {
                    layer,
                    expected,
                    actual: layout.len(),
                });
            }
        }

        let mut board = Board::new(
            self.width,
            self.height,
            self.section_count,
            &self.disabled_sections,
        )?;

        for (layer, layout) in layers {
            for (idx, &value) in layout.iter().enumerate() {
                let pos = Pos::new(idx % self.width, idx / self.width);
                let cell = TileType::from_layout(value)
                    .ok_or(ConfigError::InvalidTileValue { layer, pos, value })?;
                let Some(tile) = cell else {
                    continue;
                };
                if !board.is_playable(pos) {
                    return Err(ConfigError::TileInDisabledSection { layer, pos });
                }
                let placed = board.set(pos, layer, Some(tile));
                debug_assert!(placed, "playable cell {pos} rejected a write");
            }
        }

        Ok(board)
    }

    /// Capture a board's current contents as a configuration
    pub fn from_board(board: &Board) -> Self {
        let encode = |layer: Layer| -> Vec<i32> {
            board
                .cells(layer)
                .iter()
                .map(|&c| TileType::to_layout(c))
                .collect()
        };
        Self {
            width: board.width(),
            height: board.height(),
            section_count: board.section_count(),
            disabled_sections: board.disabled_sections(),
            front_layout: encode(Layer::Front),
            back_layout: encode(Layer::Back),
        }
    }
}

/// Build a level from text rows: `A`..`Z` are tile types 0..25, `-` is empty.
#[cfg(test)]
pub(crate) fn level_from_rows(section_count: usize, front: &[&str], back: &[&str]) -> LevelConfig {
    let decode = |rows: &[&str]| -> Vec<i32> {
        rows.iter()
            .flat_map(|row| row.bytes())
            .map(|b| match b {
                b'A'..=b'Z' => (b - b'A') as i32,
                _ => -1,
            })
            .collect()
    };
    let width = front.first().map_or(0, |row| row.len());
    let front_layout = decode(front);
    let back_layout = if back.is_empty() {
        vec![-1; front_layout.len()]
    } else {
        decode(back)
    };
    LevelConfig {
        width,
        height: front.len(),
        section_count,
        disabled_sections: Vec::new(),
        front_layout,
        back_layout,
    }
}
