//! Core rules module - pure, deterministic, and testable
//!
//! This crate is the board state machine of a two-layer, sectioned tile-matching
//! puzzle. It has **zero dependencies** on rendering, input, timing or I/O:
//!
//! - **Deterministic**: every random choice comes from an injected `rand::Rng`
//! - **Synchronous**: a move or ability resolves to a quiescent board before returning
//! - **Transactional**: a rejected call leaves the board and selection untouched
//!
//! # Module Structure
//!
//! - [`board`]: two-layer grid with section partitioning and validated mutators
//! - [`level`]: level configuration and load-time validation
//! - [`matcher`]: horizontal match detection confined to one section-row
//! - [`resolve`]: the match / clear / promote cascade state machine
//! - [`abilities`]: forced random match and front-layer shuffle
//! - [`selection`]: the arm-then-target selection protocol
//! - [`game`]: one level's play state tying everything together
//! - [`snapshot`]: read-only board copies for observers
//!
//! # Game Rules
//!
//! - **Moves**: the only action is moving a front tile into any empty cell of an
//!   enabled section; tiles are never swapped
//! - **Matches**: three or more identical tiles in a row, within one section
//! - **Promotion**: once a section-row is empty on the front, its back tiles come forward
//! - **Cascades**: match, clear, promote, repeat until nothing changes
//!
//! # Example
//!
//! ```
//! use tile_match_core::{Game, LevelConfig};
//! use tile_match_core::types::{Layer, Pos, ResolutionEvent, TileType};
//!
//! // One row of nine, one section: A A A - - - - - -
//! let mut level = LevelConfig::empty(9, 1, 1);
//! level.front_layout[..3].copy_from_slice(&[0, 0, 0]);
//!
//! let mut game = Game::with_seed(level, 7).unwrap();
//! let trace = game.submit_move(Pos::new(0, 0), Pos::new(3, 0)).unwrap();
//!
//! assert_eq!(
//!     trace.events[0],
//!     ResolutionEvent::TilesMatched {
//!         tile: TileType(0),
//!         cells: vec![Pos::new(1, 0), Pos::new(2, 0), Pos::new(3, 0)],
//!     }
//! );
//! assert!(game.is_board_empty());
//! assert_eq!(game.tile_at(Pos::new(2, 0), Layer::Front), Ok(None));
//! ```

pub mod abilities;
pub mod board;
pub mod error;
pub mod game;
pub mod level;
pub mod matcher;
pub mod resolve;
pub mod selection;
pub mod snapshot;

pub use tile_match_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::{AbilityError, BoardError, ConfigError, MoveError};
pub use game::{Game, SelectionOutcome, TraceSink};
pub use level::LevelConfig;
pub use matcher::{find_matches, has_match};
pub use resolve::{Phase, ResolutionEngine};
pub use selection::Selection;
pub use snapshot::{board_hash, BoardSnapshot};
