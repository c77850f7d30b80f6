//! Simon - Terminal Memory-Sequence Game Library
//!
//! This module exposes the game logic, tone synthesis and presentation driver
//! for testing and external use.

pub mod audio;
pub mod build_info;
pub mod core;
pub mod driver;
pub mod presentation;
pub mod simon;
pub mod utils;
