//! The game's sound catalog.

use super::sink::write_wav;
use super::tone::{SampleBuffer, ToneRequest};
use crate::core::constants::{
    BUTTON_TONE_MS, LEVEL_START_SOUND_MS, LEVEL_START_STEP, MAX_LEVELS, RESULT_CHORD_MS,
};
use crate::simon::Symbol;
use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

/// A named game sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Pad press tone.
    Button(Symbol),
    /// Ascending run announcing a level: `level + 1` notes.
    LevelStart(u32),
    /// Sequence repeated correctly.
    Success,
    /// Wrong pad or time ran out.
    Failure,
}

impl SoundCue {
    pub fn request(&self) -> ToneRequest {
        match self {
            Self::Button(symbol) => ToneRequest::single(symbol.tone_hz(), BUTTON_TONE_MS),
            Self::LevelStart(level) => {
                ToneRequest::run(&level_start_frequencies(*level), LEVEL_START_SOUND_MS)
            }
            Self::Success => ToneRequest::run(
                &[
                    Symbol::Blue.tone_hz(),
                    Symbol::Yellow.tone_hz(),
                    Symbol::Green.tone_hz(),
                ],
                RESULT_CHORD_MS,
            ),
            Self::Failure => ToneRequest::run(
                &[
                    Symbol::Yellow.tone_hz(),
                    Symbol::Blue.tone_hz(),
                    Symbol::Green.tone_hz(),
                ],
                RESULT_CHORD_MS,
            ),
        }
    }

    /// Every sound the game can play.
    pub fn catalog() -> Vec<SoundCue> {
        let mut cues: Vec<SoundCue> = Symbol::ALL.into_iter().map(SoundCue::Button).collect();
        cues.extend((1..=MAX_LEVELS).map(SoundCue::LevelStart));
        cues.push(SoundCue::Success);
        cues.push(SoundCue::Failure);
        cues
    }

    /// File-friendly name, used when exporting sounds.
    pub fn slug(&self) -> String {
        match self {
            Self::Button(symbol) => format!("button_{}", symbol.name().to_lowercase()),
            Self::LevelStart(level) => format!("level_start_{:02}", level),
            Self::Success => "success".to_string(),
            Self::Failure => "failure".to_string(),
        }
    }
}

/// Frequencies of the level-start run. Every note is offset from the red
/// base tone, so note `k` is `base * (1 + 0.25k)` rather than compounding.
pub fn level_start_frequencies(level: u32) -> Vec<f64> {
    let base = Symbol::Red.tone_hz();
    (0..=level)
        .map(|k| base * (1.0 + LEVEL_START_STEP * k as f64))
        .collect()
}

/// Renders sounds at a fixed sample rate and amplitude, keeping the four
/// button tones pre-rendered since they play on every flash.
#[derive(Debug, Clone)]
pub struct ToneBank {
    pub sample_rate_hz: u32,
    pub amplitude: i16,
    pub muted: bool,
    buttons: [SampleBuffer; 4],
}

impl ToneBank {
    pub fn new(sample_rate_hz: u32, amplitude: i16, muted: bool) -> Self {
        let buttons = Symbol::ALL
            .map(|symbol| SoundCue::Button(symbol).request().render(sample_rate_hz, amplitude));
        Self {
            sample_rate_hz,
            amplitude,
            muted,
            buttons,
        }
    }

    /// Samples for a sound; empty when muted.
    pub fn samples(&self, cue: SoundCue) -> Cow<'_, [i16]> {
        if self.muted {
            return Cow::Borrowed(&[]);
        }
        match cue {
            SoundCue::Button(symbol) => Cow::Borrowed(&self.buttons[symbol.index()]),
            other => Cow::Owned(other.request().render(self.sample_rate_hz, self.amplitude)),
        }
    }
}

/// Write every catalog sound into `dir` as `<slug>.wav`.
pub fn export_sounds(dir: &Path, bank: &ToneBank) -> io::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for cue in SoundCue::catalog() {
        let path = dir.join(format!("{}.wav", cue.slug()));
        write_wav(&path, &bank.samples(cue), bank.sample_rate_hz)?;
        written.push(path);
    }
    log::info!("exported {} sounds to {}", written.len(), dir.display());
    Ok(written)
}
