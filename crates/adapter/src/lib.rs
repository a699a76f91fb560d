//! Adapter module - JSON commands and an async session around one game
//!
//! This crate is the collaborator-facing surface of the tile-match rules. The
//! core is synchronous and I/O free; here it gets a wire format and a task to
//! live on.
//!
//! # Protocol Overview
//!
//! Line-delimited JSON. Every message is an object with a `type` tag:
//!
//! ## Client → Game
//!
//! - **select**: tap a cell (`x`, `y`); arms, re-arms, deselects or moves
//! - **move**: move a front tile directly (`from`, `to`)
//! - **moveSelection**: move the armed tile to (`x`, `y`)
//! - **randomMatch** / **shuffle**: use an ability
//! - **snapshot**: read the board
//! - **restart**: rebuild the level from scratch
//! - **hint**: ask for a move that would form a match
//!
//! ## Game → Client
//!
//! - **trace**: the ordered resolution events of a move or ability
//! - **selection**: the selection state after a `select`
//! - **snapshot**: both layers, selection and board hash
//! - **hint**: a suggested move, if any
//! - **error**: rejected command with a stable `code` and a `message`
//!
//! # Environment Variables
//!
//! - `TILE_MATCH_SEED`: ability RNG seed (default: 1)
//! - `TILE_MATCH_MAX_PENDING`: command queue depth (default: 16)
//! - `TILE_MATCH_EVENT_CAPACITY`: trace broadcast buffer (default: 64)
//!
//! # Example Protocol Flow
//!
//! ```text
//! -> {"type":"select","seq":1,"x":0,"y":0}
//! <- {"seq":1,"type":"selection","state":"armed","armed":{"x":0,"y":0}}
//! -> {"type":"select","seq":2,"x":3,"y":0}
//! <- {"seq":2,"type":"selection","state":"idle","trace":{"events":[...],"passes":1,"boardEmpty":true}}
//! -> {"type":"randomMatch","seq":3}
//! <- {"seq":3,"type":"error","code":"ability_unavailable","message":"..."}
//! ```

pub mod protocol;
pub mod runtime;

pub use tile_match_core as core;
pub use tile_match_engine as engine;
pub use tile_match_types as types;

pub use protocol::*;
pub use runtime::{execute, ChannelSink, InboundCommand, SessionConfig, SessionHandle};
