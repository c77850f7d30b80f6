//! Simon memory-sequence game data structures.
//!
//! The game shows a growing sequence of colored pads and the player has to
//! repeat it. Each completed level appends one more pad; any mistake or an
//! expired level timer restarts from level 1 with a fresh sequence.

use crate::core::constants::{FLASH_GAP_MS, FLASH_ON_MS, LEVEL_TIME_BUDGET_MS, MAX_LEVELS};
use serde::{Deserialize, Serialize};

/// One of the four pads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Symbol {
    pub const ALL: [Symbol; 4] = [Symbol::Red, Symbol::Green, Symbol::Blue, Symbol::Yellow];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Yellow => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Yellow => "Yellow",
        }
    }

    /// Button tone frequency in Hz (C4, E4, G4, C5).
    pub fn tone_hz(self) -> f64 {
        match self {
            Self::Red => 261.63,
            Self::Green => 329.63,
            Self::Blue => 392.00,
            Self::Yellow => 523.25,
        }
    }

    /// Keyboard shortcut addressing this color directly.
    pub fn hotkey(self) -> char {
        match self {
            Self::Red => 'r',
            Self::Green => 'g',
            Self::Blue => 'b',
            Self::Yellow => 'y',
        }
    }
}

/// Which symbol sits at each of the four on-screen pad positions
/// (0 = top-left, 1 = top-right, 2 = bottom-left, 3 = bottom-right).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLayout {
    pub pads: [Symbol; 4],
}

impl Default for ButtonLayout {
    fn default() -> Self {
        Self { pads: Symbol::ALL }
    }
}

impl ButtonLayout {
    pub fn symbol_at(&self, position: usize) -> Option<Symbol> {
        self.pads.get(position).copied()
    }

    pub fn position_of(&self, symbol: Symbol) -> usize {
        self.pads
            .iter()
            .position(|&s| s == symbol)
            .unwrap_or(symbol.index())
    }
}

/// How long each pad stays lit during a replay, and the pause after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayTiming {
    pub flash_on_ms: u64,
    pub flash_gap_ms: u64,
}

impl Default for ReplayTiming {
    fn default() -> Self {
        Self {
            flash_on_ms: FLASH_ON_MS,
            flash_gap_ms: FLASH_GAP_MS,
        }
    }
}

/// Resting phases of a session.
///
/// Level intros, level-complete fanfares and failure screens are not phases:
/// they are cue scripts played by the presentation layer ahead of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimonPhase {
    /// Welcome screen, waiting for the player to start.
    AwaitingStart,
    /// The sequence is being revealed; player input is ignored.
    ReplayingSequence,
    /// The player is repeating the sequence.
    AwaitingPlayerInput,
    /// All levels completed. Terminal.
    GameWon,
    /// Session abandoned by quit. Terminal.
    GameOver,
}

/// Why a level attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    WrongSymbol { expected: Symbol, got: Symbol },
    TimeExpired,
}

/// Player progress through the current sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequenceProgress {
    pub entered: usize,
    pub length: usize,
}

/// One play-through.
#[derive(Debug, Clone)]
pub struct SimonGame {
    /// 1..=MAX_LEVELS while playing; MAX_LEVELS + 1 once won.
    pub level: u32,
    pub sequence: Vec<Symbol>,
    /// Index of the next symbol the player must enter.
    pub input_index: usize,
    pub playing_sequence: bool,
    pub level_started_at_ms: u64,
    pub running: bool,
    pub phase: SimonPhase,
    pub layout: ButtonLayout,
    pub time_budget_ms: u64,
    pub timing: ReplayTiming,
    /// Highest level reached this session.
    pub best_level: u32,
    /// Number of restarts caused by mistakes or timeouts.
    pub failures: u32,
}

impl Default for SimonGame {
    fn default() -> Self {
        Self::new(LEVEL_TIME_BUDGET_MS)
    }
}

impl SimonGame {
    pub fn new(time_budget_ms: u64) -> Self {
        Self {
            level: 1,
            sequence: Vec::new(),
            input_index: 0,
            playing_sequence: false,
            level_started_at_ms: 0,
            running: true,
            phase: SimonPhase::AwaitingStart,
            layout: ButtonLayout::default(),
            time_budget_ms,
            timing: ReplayTiming::default(),
            best_level: 1,
            failures: 0,
        }
    }

    pub fn with_layout(mut self, layout: ButtonLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_timing(mut self, timing: ReplayTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn progress(&self) -> SequenceProgress {
        SequenceProgress {
            entered: self.input_index,
            length: self.sequence.len(),
        }
    }

    /// The symbol the player must enter next, if any remain.
    pub fn expected_symbol(&self) -> Option<Symbol> {
        self.sequence.get(self.input_index).copied()
    }

    /// Level number for display; never exceeds MAX_LEVELS.
    pub fn display_level(&self) -> u32 {
        self.level.min(MAX_LEVELS)
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.level_started_at_ms)
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.time_budget_ms.saturating_sub(self.elapsed_ms(now_ms))
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, SimonPhase::GameWon | SimonPhase::GameOver)
    }

    pub fn accepts_input(&self) -> bool {
        self.phase == SimonPhase::AwaitingPlayerInput && !self.playing_sequence
    }
}
