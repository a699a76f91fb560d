//! Selection protocol - arming a tile and choosing where it goes
//!
//! ```text
//! Idle      --select(p), p occupied-------------> Armed(p)
//! Idle      --select(p), p empty----------------> Idle (rejected)
//! Armed(a)  --select(a)-------------------------> Idle (deselect)
//! Armed(a)  --select(p), p occupied, p != a-----> Armed(p)
//! Armed(a)  --select(p), p empty----------------> Idle + move a -> p
//! ```
//!
//! The transition is computed here; [`Game`](crate::Game) applies it.

use crate::types::Pos;

/// Which front tile, if any, is armed for a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    Idle,
    Armed(Pos),
}

/// What a selection input asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Idle on an empty cell: nothing happens
    Ignore,
    Arm(Pos),
    Disarm,
    Move { from: Pos, to: Pos },
}

impl Selection {
    pub fn armed(&self) -> Option<Pos> {
        match *self {
            Selection::Idle => None,
            Selection::Armed(pos) => Some(pos),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }

    /// Decide the transition for selecting `pos` given its front occupancy
    pub fn transition(&self, pos: Pos, occupied: bool) -> Transition {
        match (*self, occupied) {
            (Selection::Idle, true) => Transition::Arm(pos),
            (Selection::Idle, false) => Transition::Ignore,
            (Selection::Armed(armed), _) if armed == pos => Transition::Disarm,
            (Selection::Armed(_), true) => Transition::Arm(pos),
            (Selection::Armed(armed), false) => Transition::Move {
                from: armed,
                to: pos,
            },
        }
    }

    /// Drop the selection if the armed cell no longer holds a tile
    pub fn revalidate(&mut self, occupied: impl FnOnce(Pos) -> bool) {
        if let Selection::Armed(pos) = *self {
            if !occupied(pos) {
                *self = Selection::Idle;
            }
        }
    }
}
