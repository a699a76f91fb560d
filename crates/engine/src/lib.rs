//! Engine helpers built on top of the pure core.
//!
//! - [`hint`]: look for a move that forms a match by simulating on cloned boards
//! - [`player`]: pace a resolution trace for a renderer, one event at a time
//!
//! Nothing here mutates a live game; hints work on copies and the player only
//! reads traces.

pub mod hint;
pub mod player;

pub use hint::{find_hint, has_any_move_match, preview_move, Hint};
pub use player::{PlayerStep, PlayerTiming, TracePlayer};
