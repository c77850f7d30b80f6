//! Seams between the game and whatever draws it or feeds it input.

use super::cue::MessageStyle;
use crate::simon::{SequenceProgress, Symbol};
use std::collections::VecDeque;

/// Drawing surface for the board.
///
/// Calls are idempotent state updates, not a frame protocol: a backend may
/// redraw lazily from whatever it was last told.
pub trait Renderer {
    /// Resting board: no pad lit, current level and entry progress.
    fn draw_idle(&mut self, level: u32, progress: SequenceProgress);
    fn highlight_symbol(&mut self, symbol: Symbol);
    fn unhighlight_symbol(&mut self, symbol: Symbol);
    fn draw_timer_bar(&mut self, remaining_ms: u64, total_ms: u64);
    fn draw_message(&mut self, text: &str, style: MessageStyle);
    fn clear_message(&mut self);
}

/// Abstract player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    EscapePressed,
    SymbolClicked(Symbol),
    /// A click or key press that is not on a pad.
    Confirm,
}

/// Non-blocking event queue.
pub trait InputSource {
    fn poll_event(&mut self) -> Option<InputEvent>;
}

impl InputSource for VecDeque<InputEvent> {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.pop_front()
    }
}
