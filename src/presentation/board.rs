//! Retained board model.
//!
//! `BoardView` records the latest state pushed through [`Renderer`]; the
//! terminal scene draws from it each frame and tests assert against it.

use super::cue::MessageStyle;
use super::renderer::Renderer;
use crate::core::constants::{TIMER_GREEN_ABOVE_SECS, TIMER_YELLOW_ABOVE_SECS};
use crate::simon::{SequenceProgress, Symbol};

/// Color band of the level timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerBand {
    Green,
    Yellow,
    Red,
}

impl TimerBand {
    /// Band for the remaining time, compared in whole seconds.
    pub fn for_remaining(remaining_ms: u64) -> Self {
        let secs = remaining_ms / 1000;
        if secs > TIMER_GREEN_ABOVE_SECS {
            TimerBand::Green
        } else if secs > TIMER_YELLOW_ABOVE_SECS {
            TimerBand::Yellow
        } else {
            TimerBand::Red
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardView {
    pub level: u32,
    pub progress: SequenceProgress,
    pub lit: [bool; 4],
    pub remaining_ms: u64,
    pub total_ms: u64,
    pub message: Option<(String, MessageStyle)>,
    /// Every highlight in the order it happened.
    pub highlights: Vec<Symbol>,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_lit(&self, symbol: Symbol) -> bool {
        self.lit[symbol.index()]
    }

    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().map(|(text, _)| text.as_str())
    }

    /// Remaining share of the level budget, 0.0 to 1.0.
    pub fn timer_ratio(&self) -> f64 {
        if self.total_ms == 0 {
            return 0.0;
        }
        (self.remaining_ms as f64 / self.total_ms as f64).clamp(0.0, 1.0)
    }

    pub fn timer_band(&self) -> TimerBand {
        TimerBand::for_remaining(self.remaining_ms)
    }

    /// Forget the highlight history, keeping the current board.
    pub fn take_highlights(&mut self) -> Vec<Symbol> {
        std::mem::take(&mut self.highlights)
    }
}

impl Renderer for BoardView {
    fn draw_idle(&mut self, level: u32, progress: SequenceProgress) {
        self.level = level;
        self.progress = progress;
    }

    fn highlight_symbol(&mut self, symbol: Symbol) {
        self.lit[symbol.index()] = true;
        self.highlights.push(symbol);
    }

    fn unhighlight_symbol(&mut self, symbol: Symbol) {
        self.lit[symbol.index()] = false;
    }

    fn draw_timer_bar(&mut self, remaining_ms: u64, total_ms: u64) {
        self.remaining_ms = remaining_ms;
        self.total_ms = total_ms;
    }

    fn draw_message(&mut self, text: &str, style: MessageStyle) {
        self.message = Some((text.to_string(), style));
    }

    fn clear_message(&mut self) {
        self.message = None;
    }
}
