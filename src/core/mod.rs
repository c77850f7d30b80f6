//! Core settings: game constants, time sources and player config.

#![allow(unused_imports)]

pub mod clock;
pub mod config;
pub mod constants;

pub use clock::*;
pub use config::*;
pub use constants::*;
