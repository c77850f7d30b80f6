//! Player-tunable settings loaded from ~/.simon/config.json.
//!
//! Every field has a default, so a partial or missing file is fine.
//! Command-line flags are applied on top by the binary.

use crate::core::constants::*;
use crate::utils::persistence::{load_json_or_default, save_json};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub sample_rate: u32,
    pub amplitude: i16,
    /// Skip all audio output, including the WAV recording.
    pub muted: bool,
    /// Flat per-level allowance; the same for every level.
    pub level_time_budget_secs: u64,
    pub frame_interval_ms: u64,
    pub flash_on_ms: u64,
    pub flash_gap_ms: u64,
    /// Shuffle which pad position shows which color at session start.
    pub shuffle_pads: bool,
    /// Fixed RNG seed; wall-clock seeded when absent.
    pub seed: Option<u64>,
    /// Append every played sound to this WAV file.
    pub record_wav: Option<PathBuf>,
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE_HZ,
            amplitude: AMPLITUDE,
            muted: false,
            level_time_budget_secs: LEVEL_TIME_BUDGET_MS / 1000,
            frame_interval_ms: FRAME_INTERVAL_MS,
            flash_on_ms: FLASH_ON_MS,
            flash_gap_ms: FLASH_GAP_MS,
            shuffle_pads: true,
            seed: None,
            record_wav: None,
            log_level: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Load from ~/.simon/config.json, falling back to defaults.
    pub fn load() -> Self {
        load_json_or_default::<GameConfig>(CONFIG_FILE).validated()
    }

    /// Write this config to ~/.simon/config.json, returning the path.
    pub fn save(&self) -> io::Result<PathBuf> {
        save_json(CONFIG_FILE, self)
    }

    /// Clamp values that would stall or break the game.
    pub fn validated(mut self) -> Self {
        self.sample_rate = self.sample_rate.clamp(8_000, 192_000);
        self.amplitude = self.amplitude.clamp(0, i16::MAX);
        self.level_time_budget_secs = self.level_time_budget_secs.clamp(1, 3_600);
        self.frame_interval_ms = self.frame_interval_ms.clamp(1, 250);
        self.flash_on_ms = self.flash_on_ms.clamp(1, 10_000);
        self.flash_gap_ms = self.flash_gap_ms.min(10_000);
        self
    }

    pub fn level_time_budget_ms(&self) -> u64 {
        self.level_time_budget_secs.saturating_mul(1000)
    }

    /// Parsed log level; unknown names fall back to `Info`.
    pub fn log_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
