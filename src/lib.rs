//! Tile match (workspace facade crate).
//!
//! Exposes `tile_match::{core,adapter,engine,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use tile_match_adapter as adapter;
pub use tile_match_core as core;
pub use tile_match_engine as engine;
pub use tile_match_types as types;
