//! Presentation instructions emitted by game transitions.

use crate::audio::SoundCue;
use crate::simon::Symbol;

/// Visual treatment of an overlay message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Failure,
    Victory,
    /// Waiting on the player (click to continue).
    Prompt,
}

/// One thing the player should see or hear, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    /// Overlay text held for `hold_ms`, then cleared.
    Message {
        text: String,
        style: MessageStyle,
        hold_ms: u64,
    },
    Sound(SoundCue),
    /// Light a pad with its tone for `on_ms`, then leave it dark for `gap_ms`.
    Flash {
        symbol: Symbol,
        on_ms: u64,
        gap_ms: u64,
    },
    Pause(u64),
    /// Show a prompt and hold everything until the player clicks.
    AwaitClick { prompt: String },
    /// The replay begins here; the level clock runs from this point.
    StartLevelClock,
}

impl Cue {
    pub fn message(text: impl Into<String>, style: MessageStyle, hold_ms: u64) -> Self {
        Self::Message {
            text: text.into(),
            style,
            hold_ms,
        }
    }

    /// Total time this cue occupies, ignoring click gates.
    pub fn duration_ms(&self) -> u64 {
        match self {
            Self::Message { hold_ms, .. } => *hold_ms,
            Self::Flash { on_ms, gap_ms, .. } => on_ms.saturating_add(*gap_ms),
            Self::Pause(ms) => *ms,
            Self::Sound(_) | Self::AwaitClick { .. } | Self::StartLevelClock => 0,
        }
    }
}

/// Time a script takes to play through, not counting click gates.
pub fn script_duration_ms(cues: &[Cue]) -> u64 {
    cues.iter()
        .map(Cue::duration_ms)
        .fold(0, u64::saturating_add)
}

/// Symbols revealed by a cue list, in order.
pub fn flashed_symbols(cues: &[Cue]) -> Vec<Symbol> {
    cues.iter()
        .filter_map(|cue| match cue {
            Cue::Flash { symbol, .. } => Some(*symbol),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations() {
        assert_eq!(Cue::message("hi", MessageStyle::Info, 300).duration_ms(), 300);
        let flash = Cue::Flash {
            symbol: Symbol::Red,
            on_ms: 500,
            gap_ms: 250,
        };
        assert_eq!(flash.duration_ms(), 750);
        assert_eq!(Cue::Sound(SoundCue::Success).duration_ms(), 0);
        assert_eq!(
            Cue::AwaitClick {
                prompt: "go".into()
            }
            .duration_ms(),
            0
        );
    }

    #[test]
    fn test_script_duration_sums_cues() {
        let cues = vec![
            Cue::message("Watch the sequence...", MessageStyle::Info, 1_000),
            Cue::Sound(SoundCue::LevelStart(2)),
            Cue::Flash {
                symbol: Symbol::Green,
                on_ms: 500,
                gap_ms: 250,
            },
            Cue::Pause(500),
        ];
        assert_eq!(script_duration_ms(&cues), 2_250);
        assert_eq!(script_duration_ms(&[]), 0);
    }

    #[test]
    fn test_durations_saturate() {
        let flash = Cue::Flash {
            symbol: Symbol::Red,
            on_ms: u64::MAX,
            gap_ms: 250,
        };
        assert_eq!(flash.duration_ms(), u64::MAX);
        assert_eq!(script_duration_ms(&[flash, Cue::Pause(1)]), u64::MAX);
        assert_eq!(Cue::StartLevelClock.duration_ms(), 0);
    }

    #[test]
    fn test_flashed_symbols_filters() {
        let cues = vec![
            Cue::Pause(10),
            Cue::Flash {
                symbol: Symbol::Blue,
                on_ms: 1,
                gap_ms: 1,
            },
            Cue::Sound(SoundCue::Failure),
            Cue::Flash {
                symbol: Symbol::Red,
                on_ms: 1,
                gap_ms: 1,
            },
        ];
        assert_eq!(flashed_symbols(&cues), vec![Symbol::Blue, Symbol::Red]);
    }
}
