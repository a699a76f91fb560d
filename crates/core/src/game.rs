//! Game module - one level's complete play state
//!
//! Ties together the resolution engine, the selection protocol, the injected
//! random source and an optional trace sink. Everything a collaborator needs
//! goes through an explicitly constructed `Game`; there is no global board.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::abilities;
use crate::error::{AbilityError, BoardError, ConfigError, MoveError};
use crate::level::LevelConfig;
use crate::resolve::ResolutionEngine;
use crate::selection::{Selection, Transition};
use crate::snapshot::BoardSnapshot;
use crate::types::{Layer, Pos, ResolutionTrace, TileType};
use crate::Board;

/// Receives every trace a [`Game`] produces, after the action has resolved.
///
/// Closures taking `&ResolutionTrace` implement this directly.
pub trait TraceSink {
    fn on_trace(&mut self, trace: &ResolutionTrace);
}

impl<F> TraceSink for F
where
    F: FnMut(&ResolutionTrace),
{
    fn on_trace(&mut self, trace: &ResolutionTrace) {
        self(trace)
    }
}

/// Result of a selection input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Nothing is armed (after a deselect, or an ignored tap on an empty cell)
    Idle,
    /// This tile is now armed
    Armed(Pos),
    /// The armed tile moved; the cascade already ran
    MoveTriggered {
        from: Pos,
        to: Pos,
        trace: ResolutionTrace,
    },
}

pub struct Game<R = StdRng> {
    level: LevelConfig,
    engine: ResolutionEngine,
    selection: Selection,
    rng: R,
    sink: Option<Box<dyn TraceSink + Send>>,
}

impl Game<StdRng> {
    /// Create a game whose abilities draw from a seeded `StdRng`
    pub fn with_seed(level: LevelConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(level, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Build the board from `level` and keep the level for restarts
    pub fn new(level: LevelConfig, rng: R) -> Result<Self, ConfigError> {
        let engine = ResolutionEngine::from_level(&level)?;
        Ok(Self {
            level,
            engine,
            selection: Selection::Idle,
            rng,
            sink: None,
        })
    }

    /// Install the sink that receives every subsequent trace
    pub fn set_sink(&mut self, sink: Box<dyn TraceSink + Send>) {
        self.sink = Some(sink);
    }

    pub fn clear_sink(&mut self) {
        self.sink = None;
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn engine(&self) -> &ResolutionEngine {
        &self.engine
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn current_selection(&self) -> Selection {
        self.selection
    }

    pub fn is_board_empty(&self) -> bool {
        self.engine.board().is_board_empty()
    }

    pub fn tile_at(&self, pos: Pos, layer: Layer) -> Result<Option<TileType>, BoardError> {
        self.engine.board().type_at(pos, layer)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(self.engine.board(), self.selection.armed())
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.capture_into(self.engine.board(), self.selection.armed());
    }

    /// Feed one tap/click on a cell into the selection protocol.
    ///
    /// Out-of-range or disabled cells are rejected and leave the selection as it
    /// was; so does a move that fails validation.
    pub fn select(&mut self, pos: Pos) -> Result<SelectionOutcome, MoveError> {
        if !self.engine.is_quiescent() {
            return Err(MoveError::ResolutionInProgress);
        }
        let board = self.engine.board();
        if !board.is_playable(pos) {
            return Err(MoveError::InvalidCoordinate(pos));
        }
        let occupied = board.is_occupied(pos, Layer::Front)?;

        match self.selection.transition(pos, occupied) {
            Transition::Ignore | Transition::Disarm => {
                self.selection = Selection::Idle;
                Ok(SelectionOutcome::Idle)
            }
            Transition::Arm(pos) => {
                self.selection = Selection::Armed(pos);
                Ok(SelectionOutcome::Armed(pos))
            }
            Transition::Move { from, to } => {
                let trace = self.submit_move(from, to)?;
                self.selection = Selection::Idle;
                Ok(SelectionOutcome::MoveTriggered { from, to, trace })
            }
        }
    }

    /// Move a front tile into an empty cell and resolve the cascade
    pub fn submit_move(&mut self, from: Pos, to: Pos) -> Result<ResolutionTrace, MoveError> {
        let trace = self.engine.submit_move(from, to)?;
        Ok(self.finish(trace))
    }

    /// Move the armed tile into `to`
    pub fn move_selection(&mut self, to: Pos) -> Result<ResolutionTrace, MoveError> {
        let from = self.selection.armed().ok_or(MoveError::NoSelectionActive)?;
        let trace = self.submit_move(from, to)?;
        self.selection = Selection::Idle;
        Ok(trace)
    }

    pub fn use_random_match(&mut self) -> Result<ResolutionTrace, AbilityError> {
        let trace = abilities::random_match(&mut self.engine, &mut self.rng)?;
        Ok(self.finish(trace))
    }

    pub fn use_shuffle(&mut self) -> Result<ResolutionTrace, AbilityError> {
        let trace = abilities::shuffle(&mut self.engine, &mut self.rng)?;
        self.selection = Selection::Idle;
        Ok(self.finish(trace))
    }

    /// Throw the board away and rebuild it from the stored level
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        self.engine = ResolutionEngine::from_level(&self.level)?;
        self.selection = Selection::Idle;
        Ok(())
    }

    fn finish(&mut self, trace: ResolutionTrace) -> ResolutionTrace {
        let board = self.engine.board();
        self.selection
            .revalidate(|pos| matches!(board.get(pos, Layer::Front), Some(Some(_))));
        if let Some(sink) = self.sink.as_mut() {
            sink.on_trace(&trace);
        }
        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::level_from_rows;
    use std::sync::{Arc, Mutex};

    fn game(sections: usize, front: &[&str], back: &[&str]) -> Game {
        Game::with_seed(level_from_rows(sections, front, back), 1).unwrap()
    }

    #[test]
    fn test_select_empty_while_idle_is_noop() {
        let mut g = game(1, &["A--"], &[]);
        assert_eq!(g.select(Pos::new(2, 0)), Ok(SelectionOutcome::Idle));
        assert_eq!(g.current_selection(), Selection::Idle);
    }

    #[test]
    fn test_select_arm_rearm_deselect() {
        let mut g = game(1, &["AB-"], &[]);
        assert_eq!(
            g.select(Pos::new(0, 0)),
            Ok(SelectionOutcome::Armed(Pos::new(0, 0)))
        );
        assert_eq!(
            g.select(Pos::new(1, 0)),
            Ok(SelectionOutcome::Armed(Pos::new(1, 0)))
        );
        assert_eq!(g.select(Pos::new(1, 0)), Ok(SelectionOutcome::Idle));
        assert!(g.current_selection().is_idle());
    }

    #[test]
    fn test_select_empty_while_armed_moves() {
        let mut g = game(1, &["AAA------"], &[]);
        g.select(Pos::new(0, 0)).unwrap();
        let outcome = g.select(Pos::new(3, 0)).unwrap();

        let SelectionOutcome::MoveTriggered { from, to, trace } = outcome else {
            panic!("expected a move, got {outcome:?}");
        };
        assert_eq!((from, to), (Pos::new(0, 0), Pos::new(3, 0)));
        assert_eq!(trace.cleared_count(), 3);
        assert!(g.is_board_empty());
        assert!(g.current_selection().is_idle());
    }

    #[test]
    fn test_select_invalid_coordinate_keeps_selection() {
        let mut config = level_from_rows(2, &["A-----"], &[]);
        config.disabled_sections = vec![1];
        let mut g = Game::with_seed(config, 1).unwrap();
        g.select(Pos::new(0, 0)).unwrap();

        assert_eq!(
            g.select(Pos::new(4, 0)),
            Err(MoveError::InvalidCoordinate(Pos::new(4, 0)))
        );
        assert_eq!(
            g.select(Pos::new(0, 9)),
            Err(MoveError::InvalidCoordinate(Pos::new(0, 9)))
        );
        assert_eq!(g.current_selection(), Selection::Armed(Pos::new(0, 0)));
    }

    #[test]
    fn test_move_selection_requires_armed_tile() {
        let mut g = game(1, &["A--"], &[]);
        assert_eq!(
            g.move_selection(Pos::new(2, 0)),
            Err(MoveError::NoSelectionActive)
        );
        g.select(Pos::new(0, 0)).unwrap();
        let trace = g.move_selection(Pos::new(2, 0)).unwrap();
        assert!(trace.is_quiescent());
        assert_eq!(g.tile_at(Pos::new(2, 0), Layer::Front), Ok(Some(TileType(0))));
    }

    #[test]
    fn test_selection_dropped_when_armed_tile_is_cleared() {
        let mut g = game(1, &["AAA", "---"], &[]);
        g.select(Pos::new(1, 0)).unwrap();
        g.use_random_match().unwrap();
        assert!(g.current_selection().is_idle());
    }

    #[test]
    fn test_direct_move_revalidates_selection() {
        let mut g = game(1, &["AB-"], &[]);
        g.select(Pos::new(1, 0)).unwrap();
        g.submit_move(Pos::new(1, 0), Pos::new(2, 0)).unwrap();
        assert!(g.current_selection().is_idle());
    }

    #[test]
    fn test_shuffle_disarms() {
        let mut g = game(1, &["AB-C"], &[]);
        g.select(Pos::new(0, 0)).unwrap();
        g.use_shuffle().unwrap();
        assert!(g.current_selection().is_idle());
    }

    #[test]
    fn test_restart_rebuilds_level() {
        let mut g = game(1, &["AAA------"], &["BBB------"]);
        g.submit_move(Pos::new(0, 0), Pos::new(3, 0)).unwrap();
        assert_ne!(g.board(), &g.level().build().unwrap());

        g.restart().unwrap();
        assert_eq!(g.board(), &g.level().build().unwrap());
    }

    #[test]
    fn test_sink_receives_traces() {
        let seen: Arc<Mutex<Vec<ResolutionTrace>>> = Arc::default();
        let mut g = game(1, &["AAA------"], &[]);
        let sink_seen = Arc::clone(&seen);
        g.set_sink(Box::new(move |trace: &ResolutionTrace| {
            sink_seen.lock().unwrap().push(trace.clone());
        }));

        let trace = g.submit_move(Pos::new(0, 0), Pos::new(3, 0)).unwrap();
        assert!(g.use_random_match().is_err());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], trace);
    }

    #[test]
    fn test_snapshot_reports_selection() {
        let mut g = game(1, &["A--"], &["B--"]);
        g.select(Pos::new(0, 0)).unwrap();
        let snap = g.snapshot();
        assert_eq!(snap.selection, Some(Pos::new(0, 0)));
        assert_eq!(snap.cell(Pos::new(0, 0), Layer::Back), Some(Some(TileType(1))));
    }
}
