//! Terminal UI: shared widgets and the Simon scene.

pub mod game_common;
pub mod simon_scene;

pub use simon_scene::render_simon;
