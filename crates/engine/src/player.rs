//! Step-player - paces a resolution trace for presentation
//!
//! The rules engine resolves a whole cascade in one call. A renderer that wants
//! to show the cascade step by step feeds the trace in here and calls
//! [`TracePlayer::tick`] from its frame loop; each event is released only after
//! the previous one has been held for its pause.

use std::collections::VecDeque;

use tile_match_types::{
    ResolutionEvent, ResolutionTrace, MATCH_PAUSE_MS, PROMOTE_PAUSE_MS, QUIESCENT_PAUSE_MS,
    SHUFFLE_PAUSE_MS,
};

/// How long each kind of event is held on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerTiming {
    pub shuffle_ms: u32,
    pub match_ms: u32,
    pub promote_ms: u32,
    pub quiescent_ms: u32,
}

impl Default for PlayerTiming {
    fn default() -> Self {
        Self {
            shuffle_ms: SHUFFLE_PAUSE_MS,
            match_ms: MATCH_PAUSE_MS,
            promote_ms: PROMOTE_PAUSE_MS,
            quiescent_ms: QUIESCENT_PAUSE_MS,
        }
    }
}

impl PlayerTiming {
    /// Release every event immediately
    pub const INSTANT: PlayerTiming = PlayerTiming {
        shuffle_ms: 0,
        match_ms: 0,
        promote_ms: 0,
        quiescent_ms: 0,
    };

    pub fn hold_for(&self, event: &ResolutionEvent) -> u32 {
        match event {
            ResolutionEvent::Shuffled { .. } => self.shuffle_ms,
            ResolutionEvent::TilesMatched { .. } => self.match_ms,
            ResolutionEvent::TilesPromoted { .. } => self.promote_ms,
            ResolutionEvent::BoardQuiescent { .. } => self.quiescent_ms,
        }
    }

    /// Start offset of every event in `trace`, relative to the first one
    pub fn schedule<'a>(&self, trace: &'a ResolutionTrace) -> Vec<(u32, &'a ResolutionEvent)> {
        let mut at = 0u32;
        trace
            .events
            .iter()
            .map(|event| {
                let start = at;
                at = at.saturating_add(self.hold_for(event));
                (start, event)
            })
            .collect()
    }

    /// Total time to play `trace` through
    pub fn duration(&self, trace: &ResolutionTrace) -> u32 {
        trace
            .events
            .iter()
            .fold(0u32, |acc, e| acc.saturating_add(self.hold_for(e)))
    }
}

/// An event released by the player, with how long it will be held
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStep {
    pub event: ResolutionEvent,
    pub hold_ms: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TracePlayer {
    timing: PlayerTiming,
    queue: VecDeque<ResolutionEvent>,
    hold_timer_ms: u32,
}

impl TracePlayer {
    pub fn new(timing: PlayerTiming) -> Self {
        Self {
            timing,
            queue: VecDeque::new(),
            hold_timer_ms: 0,
        }
    }

    pub fn timing(&self) -> PlayerTiming {
        self.timing
    }

    /// Queue every event of `trace` behind whatever is still playing
    pub fn enqueue(&mut self, trace: &ResolutionTrace) {
        self.queue.extend(trace.events.iter().cloned());
    }

    /// Advance the clock; returns the next event once the current hold expires.
    ///
    /// At most one event is released per call.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<PlayerStep> {
        if self.hold_timer_ms > 0 {
            self.hold_timer_ms = self.hold_timer_ms.saturating_sub(elapsed_ms);
            if self.hold_timer_ms > 0 {
                return None;
            }
        }

        let event = self.queue.pop_front()?;
        let hold_ms = self.timing.hold_for(&event);
        self.hold_timer_ms = hold_ms;
        Some(PlayerStep { event, hold_ms })
    }

    /// Events not yet released
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Time left on the event currently held
    pub fn remaining_hold_ms(&self) -> u32 {
        self.hold_timer_ms
    }

    /// Nothing queued and nothing being held
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.hold_timer_ms == 0
    }

    /// Drop everything queued, e.g. on restart
    pub fn clear(&mut self) {
        self.queue.clear();
        self.hold_timer_ms = 0;
    }
}
