//! Game rules, timings and audio constants.

// Game rules
pub const ALPHABET_SIZE: usize = 4;
pub const MAX_LEVELS: u32 = 10;
pub const MAX_SEQUENCE_LENGTH: usize = 10;
pub const LEVEL_TIME_BUDGET_MS: u64 = 30_000;

// Loop
pub const FRAME_INTERVAL_MS: u64 = 16; // ~60Hz

// Replay and feedback timing
pub const REPLAY_LEAD_IN_MS: u64 = 1_000;
pub const FLASH_ON_MS: u64 = 500;
pub const FLASH_GAP_MS: u64 = 250;
pub const INPUT_FEEDBACK_MS: u64 = 200;

// Message hold times
pub const SUCCESS_MESSAGE_MS: u64 = 1_000;
pub const LEVEL_COMPLETE_MESSAGE_MS: u64 = 1_000;
pub const NEXT_LEVEL_MESSAGE_MS: u64 = 1_200;
pub const NEXT_LEVEL_PAUSE_MS: u64 = 500;
pub const FAILURE_MESSAGE_MS: u64 = 1_500;
pub const FAILURE_PAUSE_MS: u64 = 500;
pub const TIMEOUT_MESSAGE_MS: u64 = 1_000;
pub const VICTORY_MESSAGE_MS: u64 = 2_000;

// Audio
pub const SAMPLE_RATE_HZ: u32 = 44_100;
pub const AMPLITUDE: i16 = 28_000;
pub const BUTTON_TONE_MS: u64 = 300;
pub const LEVEL_START_SOUND_MS: u64 = 800;
pub const RESULT_CHORD_MS: u64 = 1_000;
pub const LEVEL_START_STEP: f64 = 0.25; // each note of the run is base * (1 + 0.25k)

// Timer bar color thresholds (seconds remaining)
pub const TIMER_GREEN_ABOVE_SECS: u64 = 15;
pub const TIMER_YELLOW_ABOVE_SECS: u64 = 7;
