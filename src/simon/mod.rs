//! Simon memory-sequence minigame.
//!
//! A pure state machine: every transition mutates a [`SimonGame`] and returns
//! the presentation cues describing what the player should see and hear.
//! Drawing, sound playback and pacing live in [`crate::presentation`].

pub mod logic;
pub mod sequence;
pub mod types;

pub use logic::*;
pub use sequence::*;
pub use types::*;
