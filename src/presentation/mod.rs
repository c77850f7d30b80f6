//! Presentation driver: cue scripts, pacing, and the drawing/input seams.

#![allow(unused_imports)]

pub mod board;
pub mod cue;
pub mod director;
pub mod renderer;

pub use board::*;
pub use cue::*;
pub use director::*;
pub use renderer::*;
