//! Resolution engine - the match / clear / promote cascade
//!
//! The engine owns the board and drives it between quiescent states:
//!
//! 1. **Matching**: run the match finder. With no groups and no promotable
//!    section-row, the board is quiescent and `BoardQuiescent` is emitted.
//! 2. **Clearing**: remove every group found by that one pass, one
//!    `TilesMatched` event per group in discovery order.
//! 3. **Promoting**: every enabled section-row whose front cells are all empty
//!    moves its back tiles forward, one `TilesPromoted` event per section-row.
//!    Then back to matching.
//!
//! Every clear removes front tiles and every promotion removes back tiles, and
//! nothing ever adds a tile, so the loop terminates within `total_tiles` passes.
//!
//! Public entry points run the loop to quiescence before returning. [`step`]
//! exposes single transitions for callers that want to observe a cascade as it
//! happens; until the phase is quiescent again, new input is rejected.
//!
//! [`step`]: ResolutionEngine::step

use crate::board::Board;
use crate::error::MoveError;
use crate::level::LevelConfig;
use crate::matcher::find_matches;
use crate::types::{Layer, Pos, ResolutionEvent, ResolutionTrace, TileType};
use crate::ConfigError;

/// Where the engine is inside a cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No pending matches or promotions; the only state that accepts input
    Quiescent,
    /// Next step runs the match finder and clears what it finds
    Matching,
    /// Next step promotes back rows behind emptied section-rows
    Promoting,
}

/// Board plus the cascade state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionEngine {
    board: Board,
    phase: Phase,
    /// Events of the resolution currently in flight
    pending: ResolutionTrace,
}

impl ResolutionEngine {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            phase: Phase::Quiescent,
            pending: ResolutionTrace::new(),
        }
    }

    pub fn from_level(level: &LevelConfig) -> Result<Self, ConfigError> {
        level.build().map(Self::new)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_quiescent(&self) -> bool {
        self.phase == Phase::Quiescent
    }

    /// Move a front tile into an empty cell and resolve the cascade.
    ///
    /// Any empty cell in an enabled section is a legal target, adjacent or not,
    /// whether or not the move forms a match.
    pub fn submit_move(&mut self, from: Pos, to: Pos) -> Result<ResolutionTrace, MoveError> {
        self.begin_move(from, to)?;
        Ok(self.run_to_quiescence())
    }

    /// Validate and apply a move, leaving the cascade to [`step`](Self::step).
    pub fn begin_move(&mut self, from: Pos, to: Pos) -> Result<(), MoveError> {
        if !self.is_quiescent() {
            return Err(MoveError::ResolutionInProgress);
        }
        self.board.move_front_tile(from, to)?;
        self.begin(Phase::Matching);
        Ok(())
    }

    /// Start a resolution after the caller already changed the board.
    ///
    /// Used by the abilities: a forced clear resumes at promotion, a shuffle
    /// resumes at matching.
    pub(crate) fn begin_with(&mut self, phase: Phase, events: Vec<ResolutionEvent>, passes: u32) {
        self.begin(phase);
        self.pending.events = events;
        self.pending.passes = passes;
    }

    fn begin(&mut self, phase: Phase) {
        self.pending = ResolutionTrace::new();
        self.phase = phase;
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Advance one phase transition and return the events it produced.
    ///
    /// Returns an empty slice when already quiescent.
    pub fn step(&mut self) -> &[ResolutionEvent] {
        let start = self.pending.events.len();
        match self.phase {
            Phase::Quiescent => return &[],
            Phase::Matching => self.match_step(),
            Phase::Promoting => self.promote_step(),
        }
        &self.pending.events[start..]
    }

    /// Run every remaining step and hand back the whole trace
    pub fn run_to_quiescence(&mut self) -> ResolutionTrace {
        while !self.is_quiescent() {
            self.step();
        }
        std::mem::take(&mut self.pending)
    }

    fn match_step(&mut self) {
        let groups = find_matches(&self.board);
        if groups.is_empty() {
            // A move can empty a section-row without matching; promote before settling.
            if self.has_promotable_row() {
                self.phase = Phase::Promoting;
            } else {
                self.pending.push(ResolutionEvent::BoardQuiescent {
                    board_empty: self.board.is_board_empty(),
                });
                self.phase = Phase::Quiescent;
            }
            return;
        }

        for group in groups {
            for &pos in &group.cells {
                let cleared = self.board.set(pos, Layer::Front, None);
                debug_assert!(cleared, "match group cell {pos} is not playable");
            }
            self.pending.push(ResolutionEvent::TilesMatched {
                tile: group.tile,
                cells: group.cells,
            });
        }
        self.pending.passes += 1;
        self.phase = Phase::Promoting;
    }

    fn promote_step(&mut self) {
        let sections: Vec<usize> = self.board.enabled_sections().collect();
        for y in 0..self.board.height() {
            for &section in &sections {
                if !self.board.is_row_empty_in_section(section, y, Layer::Front) {
                    continue;
                }
                let cells = self.promote_row(section, y);
                if !cells.is_empty() {
                    self.pending.push(ResolutionEvent::TilesPromoted {
                        section,
                        row: y,
                        cells,
                    });
                }
            }
        }
        self.phase = Phase::Matching;
    }

    fn promote_row(&mut self, section: usize, y: usize) -> Vec<Pos> {
        let mut promoted = Vec::new();
        for x in self.board.section_columns(section) {
            let pos = Pos::new(x, y);
            let tile: Option<TileType> = self.board.get(pos, Layer::Back).flatten();
            if let Some(tile) = tile {
                let moved = self.board.set(pos, Layer::Back, None)
                    && self.board.set(pos, Layer::Front, Some(tile));
                debug_assert!(moved, "promoted cell {pos} is not playable");
                promoted.push(pos);
            }
        }
        promoted
    }

    fn has_promotable_row(&self) -> bool {
        (0..self.board.height()).any(|y| {
            self.board.enabled_sections().any(|section| {
                self.board.is_row_empty_in_section(section, y, Layer::Front)
                    && !self.board.is_row_empty_in_section(section, y, Layer::Back)
            })
        })
    }
}
