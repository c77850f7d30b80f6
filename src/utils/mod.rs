//! Utility modules: data-directory persistence and file logging.

#![allow(unused_imports)]

pub mod logging;
pub mod persistence;

pub use logging::*;
pub use persistence::*;
