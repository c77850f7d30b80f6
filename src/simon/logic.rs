//! Simon game logic.
//!
//! Handles sequence growth, player input validation, level progression and
//! the per-level timer. Transitions return the cues the presentation layer
//! should play; nothing in here draws, sleeps or touches audio.

use super::sequence::append_symbol;
use super::types::{FailureReason, SimonGame, SimonPhase, Symbol};
use crate::audio::SoundCue;
use crate::core::constants::*;
use crate::presentation::cue::{script_duration_ms, Cue, MessageStyle};
use rand::Rng;

/// What a submitted symbol did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The game was not listening (replay running, or not in play).
    Ignored,
    /// Correct symbol, more to go.
    Accepted,
    /// Correct final symbol; the level advanced or the game was won.
    LevelComplete,
    /// Wrong symbol or expired timer; the game restarted at level 1.
    Failed(FailureReason),
}

/// Result of an input-driven transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub outcome: SubmitOutcome,
    pub cues: Vec<Cue>,
}

impl Transition {
    fn ignored() -> Self {
        Self {
            outcome: SubmitOutcome::Ignored,
            cues: Vec::new(),
        }
    }
}

/// Start a fresh game at level 1 with a one-symbol sequence.
pub fn start_new_game<R: Rng + ?Sized>(game: &mut SimonGame, rng: &mut R, now_ms: u64) -> Vec<Cue> {
    game.level = 1;
    game.sequence.clear();
    append_symbol(&mut game.sequence, rng);
    game.input_index = 0;
    game.level_started_at_ms = now_ms;
    game.running = true;
    log::info!("new game started");

    let mut cues = vec![Cue::Sound(SoundCue::LevelStart(1))];
    cues.extend(begin_replay(game));
    cues
}

/// Enter the replay phase and describe the reveal, one flash per symbol in
/// sequence order.
pub fn begin_replay(game: &mut SimonGame) -> Vec<Cue> {
    game.playing_sequence = true;
    game.phase = SimonPhase::ReplayingSequence;

    let timing = game.timing;
    let mut cues = Vec::with_capacity(game.sequence.len() + 2);
    cues.push(Cue::StartLevelClock);
    cues.push(Cue::message(
        "Watch the sequence...",
        MessageStyle::Info,
        REPLAY_LEAD_IN_MS,
    ));
    cues.extend(game.sequence.iter().map(|&symbol| Cue::Flash {
        symbol,
        on_ms: timing.flash_on_ms,
        gap_ms: timing.flash_gap_ms,
    }));
    cues
}

/// Hand control to the player once the reveal has been shown.
pub fn finish_replay(game: &mut SimonGame) {
    if game.phase != SimonPhase::ReplayingSequence {
        return;
    }
    game.playing_sequence = false;
    game.input_index = 0;
    game.phase = SimonPhase::AwaitingPlayerInput;
}

/// True once the level's time budget is used up.
pub fn check_time_expired(game: &SimonGame, now_ms: u64) -> bool {
    game.elapsed_ms(now_ms) >= game.time_budget_ms
}

/// Apply one player symbol.
pub fn submit_symbol<R: Rng + ?Sized>(
    game: &mut SimonGame,
    symbol: Symbol,
    now_ms: u64,
    rng: &mut R,
) -> Transition {
    if !game.accepts_input() {
        return Transition::ignored();
    }

    // An expired timer fails the level whatever was pressed
    if check_time_expired(game, now_ms) {
        return fail(game, FailureReason::TimeExpired, rng, now_ms);
    }

    let Some(expected) = game.expected_symbol() else {
        return Transition::ignored();
    };

    let mut cues = vec![Cue::Flash {
        symbol,
        on_ms: INPUT_FEEDBACK_MS,
        gap_ms: 0,
    }];

    if symbol != expected {
        let mut failed = fail(
            game,
            FailureReason::WrongSymbol {
                expected,
                got: symbol,
            },
            rng,
            now_ms,
        );
        cues.append(&mut failed.cues);
        failed.cues = cues;
        return failed;
    }

    game.input_index += 1;
    if game.input_index < game.sequence.len() {
        return Transition {
            outcome: SubmitOutcome::Accepted,
            cues,
        };
    }

    log::info!("level {} complete", game.level);
    cues.push(Cue::Sound(SoundCue::Success));
    cues.push(Cue::message(
        "SUCCESS!",
        MessageStyle::Success,
        SUCCESS_MESSAGE_MS,
    ));
    let script_start = now_ms.saturating_add(script_duration_ms(&cues));
    cues.extend(advance_level(game, rng, script_start));
    Transition {
        outcome: SubmitOutcome::LevelComplete,
        cues,
    }
}

/// Move to the next level, or win once the last level is cleared.
///
/// `now_ms` is when the returned script is expected to start. The level
/// clock is set to the end of the announcement; the replay's
/// `StartLevelClock` cue pins it to when the replay actually begins.
pub fn advance_level<R: Rng + ?Sized>(game: &mut SimonGame, rng: &mut R, now_ms: u64) -> Vec<Cue> {
    game.level += 1;
    game.input_index = 0;

    if game.level > MAX_LEVELS {
        game.phase = SimonPhase::GameWon;
        game.running = false;
        game.playing_sequence = false;
        game.best_level = MAX_LEVELS;
        log::info!("all {} levels complete", MAX_LEVELS);
        return vec![Cue::message(
            "Congratulations! You've completed all levels!",
            MessageStyle::Victory,
            VICTORY_MESSAGE_MS,
        )];
    }

    if game.sequence.len() < MAX_SEQUENCE_LENGTH {
        append_symbol(&mut game.sequence, rng);
    }
    game.best_level = game.best_level.max(game.level);
    log::info!("starting level {}", game.level);

    let mut cues = vec![
        Cue::message(
            format!("Level {} Complete!", game.level - 1),
            MessageStyle::Success,
            LEVEL_COMPLETE_MESSAGE_MS,
        ),
        Cue::Sound(SoundCue::LevelStart(game.level)),
        Cue::message(
            format!("Moving to Level {}", game.level),
            MessageStyle::Info,
            NEXT_LEVEL_MESSAGE_MS,
        ),
        Cue::Pause(NEXT_LEVEL_PAUSE_MS),
    ];
    game.level_started_at_ms = now_ms.saturating_add(script_duration_ms(&cues));
    cues.extend(begin_replay(game));
    cues
}

/// Throw away all progress: level 1, brand-new one-symbol sequence.
pub fn reset_to_level_one<R: Rng + ?Sized>(
    game: &mut SimonGame,
    rng: &mut R,
    now_ms: u64,
) -> Vec<Cue> {
    game.level = 1;
    game.sequence.clear();
    append_symbol(&mut game.sequence, rng);
    game.input_index = 0;
    game.level_started_at_ms = now_ms;
    game.failures += 1;

    let mut cues = vec![
        Cue::Sound(SoundCue::Failure),
        Cue::message("FAILURE!", MessageStyle::Failure, FAILURE_MESSAGE_MS),
        Cue::Pause(FAILURE_PAUSE_MS),
        Cue::AwaitClick {
            prompt: "Game Over! Click to restart.".to_string(),
        },
    ];
    cues.extend(begin_replay(game));
    cues
}

fn fail<R: Rng + ?Sized>(
    game: &mut SimonGame,
    reason: FailureReason,
    rng: &mut R,
    now_ms: u64,
) -> Transition {
    let mut cues = Vec::new();
    match reason {
        FailureReason::WrongSymbol { expected, got } => {
            log::info!(
                "level {} failed at step {}: expected {}, got {}",
                game.level,
                game.input_index + 1,
                expected.name(),
                got.name()
            );
        }
        FailureReason::TimeExpired => {
            log::info!("level {} failed: time expired", game.level);
            cues.push(Cue::message(
                "Time's up!",
                MessageStyle::Failure,
                TIMEOUT_MESSAGE_MS,
            ));
        }
    }
    cues.extend(reset_to_level_one(game, rng, now_ms));
    Transition {
        outcome: SubmitOutcome::Failed(reason),
        cues,
    }
}

/// Per-tick timer check. An expired budget while the player is entering the
/// sequence fails exactly like a wrong symbol.
pub fn tick<R: Rng + ?Sized>(game: &mut SimonGame, now_ms: u64, rng: &mut R) -> Option<Transition> {
    if game.accepts_input() && check_time_expired(game, now_ms) {
        Some(fail(game, FailureReason::TimeExpired, rng, now_ms))
    } else {
        None
    }
}

/// Restart the level timer. Called with the time a replay actually began.
pub fn restart_level_clock(game: &mut SimonGame, now_ms: u64) {
    game.level_started_at_ms = now_ms;
}

/// End the session on the player's request.
pub fn quit(game: &mut SimonGame) {
    if game.phase != SimonPhase::GameWon {
        game.phase = SimonPhase::GameOver;
    }
    game.running = false;
    game.playing_sequence = false;
    log::info!("session ended at level {}", game.display_level());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::cue::flashed_symbols;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn seeded_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn wrong_for(symbol: Symbol) -> Symbol {
        Symbol::ALL[(symbol.index() + 1) % 4]
    }

    /// Start a game and hand control to the player.
    fn started(rng: &mut ChaCha8Rng) -> SimonGame {
        let mut game = SimonGame::new(LEVEL_TIME_BUDGET_MS);
        start_new_game(&mut game, rng, 0);
        finish_replay(&mut game);
        game
    }

    /// Enter the whole sequence correctly at `now_ms`.
    fn clear_level(game: &mut SimonGame, rng: &mut ChaCha8Rng, now_ms: u64) -> Transition {
        let sequence = game.sequence.clone();
        let mut last = Transition::ignored();
        for symbol in sequence {
            last = submit_symbol(game, symbol, now_ms, rng);
        }
        last
    }

    #[test]
    fn test_start_new_game() {
        let mut rng = seeded_rng();
        let mut game = SimonGame::new(LEVEL_TIME_BUDGET_MS);
        let cues = start_new_game(&mut game, &mut rng, 1_234);

        assert_eq!(game.level, 1);
        assert_eq!(game.sequence.len(), 1);
        assert_eq!(game.input_index, 0);
        assert_eq!(game.level_started_at_ms, 1_234);
        assert_eq!(game.phase, SimonPhase::ReplayingSequence);
        assert!(game.playing_sequence);
        assert_eq!(cues[0], Cue::Sound(SoundCue::LevelStart(1)));
        assert_eq!(flashed_symbols(&cues), game.sequence);
    }

    #[test]
    fn test_replay_reveals_in_sequence_order() {
        let mut game = SimonGame::default();
        game.sequence = vec![Symbol::Yellow, Symbol::Red, Symbol::Yellow, Symbol::Green];
        let cues = begin_replay(&mut game);
        assert_eq!(flashed_symbols(&cues), game.sequence);
        assert_eq!(cues[0], Cue::StartLevelClock);
        assert!(matches!(cues[1], Cue::Message { hold_ms: 1_000, .. }));
        assert!(cues[2..].iter().all(|c| matches!(
            c,
            Cue::Flash {
                on_ms: 500,
                gap_ms: 250,
                ..
            }
        )));
    }

    #[test]
    fn test_finish_replay_hands_over_control() {
        let mut rng = seeded_rng();
        let mut game = SimonGame::default();
        start_new_game(&mut game, &mut rng, 0);
        game.input_index = 1;
        finish_replay(&mut game);
        assert!(!game.playing_sequence);
        assert_eq!(game.input_index, 0);
        assert_eq!(game.phase, SimonPhase::AwaitingPlayerInput);
    }

    #[test]
    fn test_finish_replay_ignored_after_quit() {
        let mut rng = seeded_rng();
        let mut game = SimonGame::default();
        start_new_game(&mut game, &mut rng, 0);
        quit(&mut game);
        finish_replay(&mut game);
        assert_eq!(game.phase, SimonPhase::GameOver);
    }

    #[test]
    fn test_input_ignored_during_replay() {
        let mut rng = seeded_rng();
        let mut game = SimonGame::default();
        start_new_game(&mut game, &mut rng, 0);
        let before = game.clone();

        let symbol = game.sequence[0];
        let t = submit_symbol(&mut game, symbol, 10, &mut rng);
        assert_eq!(t.outcome, SubmitOutcome::Ignored);
        assert!(t.cues.is_empty());
        assert_eq!(game.input_index, before.input_index);
        assert_eq!(game.sequence, before.sequence);
    }

    #[test]
    fn test_input_ignored_before_start() {
        let mut rng = seeded_rng();
        let mut game = SimonGame::default();
        let t = submit_symbol(&mut game, Symbol::Red, 0, &mut rng);
        assert_eq!(t.outcome, SubmitOutcome::Ignored);
        assert_eq!(game.phase, SimonPhase::AwaitingStart);
    }

    #[test]
    fn test_level_one_correct_advances_to_level_two() {
        let mut rng = seeded_rng();
        let mut game = started(&mut rng);
        let first = game.sequence[0];

        let t = submit_symbol(&mut game, first, 5_000, &mut rng);

        assert_eq!(t.outcome, SubmitOutcome::LevelComplete);
        assert_eq!(game.level, 2);
        assert_eq!(game.sequence.len(), 2);
        assert_eq!(game.sequence[0], first);
        assert_eq!(game.phase, SimonPhase::ReplayingSequence);
        assert!(game.playing_sequence);
        // Feedback flash, SUCCESS!, then the announcement before the replay
        assert_eq!(game.level_started_at_ms, 5_000 + 200 + 1_000 + 1_000 + 1_200 + 500);
        assert_eq!(game.best_level, 2);
        assert!(t.cues.contains(&Cue::Sound(SoundCue::Success)));
        assert!(t.cues.contains(&Cue::Sound(SoundCue::LevelStart(2))));
    }

    #[test]
    fn test_correct_inputs_step_index_once_each() {
        let mut rng = seeded_rng();
        let mut game = started(&mut rng);
        for _ in 0..4 {
            clear_level(&mut game, &mut rng, 0);
            finish_replay(&mut game);
        }
        assert_eq!(game.level, 5);
        let n = game.sequence.len();
        assert_eq!(n, 5);

        for k in 0..n - 1 {
            assert_eq!(game.input_index, k);
            let symbol = game.sequence[k];
            let t = submit_symbol(&mut game, symbol, 0, &mut rng);
            assert_eq!(t.outcome, SubmitOutcome::Accepted);
            assert_eq!(game.input_index, k + 1);
        }
        let symbol = game.sequence[n - 1];
        let t = submit_symbol(&mut game, symbol, 0, &mut rng);
        assert_eq!(t.outcome, SubmitOutcome::LevelComplete);
        assert_eq!(game.level, 6);
    }

    #[test]
    fn test_sequence_length_tracks_level() {
        let mut rng = seeded_rng();
        let mut game = started(&mut rng);
        for level in 1..=MAX_LEVELS {
            assert_eq!(game.level, level);
            assert_eq!(game.sequence.len(), level as usize);
            clear_level(&mut game, &mut rng, 0);
            finish_replay(&mut game);
        }
        assert_eq!(game.phase, SimonPhase::GameWon);
    }

    #[test]
    fn test_wrong_symbol_resets_from_any_step() {
        for k in 0..5 {
            let mut rng = seeded_rng();
            let mut game = started(&mut rng);
            for _ in 0..4 {
                clear_level(&mut game, &mut rng, 0);
                finish_replay(&mut game);
            }
            assert_eq!(game.level, 5);

            for i in 0..k {
                let symbol = game.sequence[i];
                submit_symbol(&mut game, symbol, 0, &mut rng);
            }
            let expected = game.sequence[k];
            let t = submit_symbol(&mut game, wrong_for(expected), 0, &mut rng);

            assert_eq!(
                t.outcome,
                SubmitOutcome::Failed(FailureReason::WrongSymbol {
                    expected,
                    got: wrong_for(expected),
                })
            );
            assert_eq!(game.level, 1);
            assert_eq!(game.sequence.len(), 1);
            assert_eq!(game.input_index, 0);
            assert_eq!(game.phase, SimonPhase::ReplayingSequence);
            assert_eq!(game.failures, 1);
            assert_eq!(game.best_level, 5);
        }
    }

    #[test]
    fn test_failure_cues_gate_replay_behind_click() {
        let mut rng = seeded_rng();
        let mut game = started(&mut rng);
        let symbol = wrong_for(game.sequence[0]);
        let t = submit_symbol(&mut game, symbol, 0, &mut rng);

        let gate = t
            .cues
            .iter()
            .position(|c| matches!(c, Cue::AwaitClick { .. }))
            .expect("failure waits for a click");
        let failure_sound = t
            .cues
            .iter()
            .position(|c| *c == Cue::Sound(SoundCue::Failure))
            .expect("failure sound");
        assert!(failure_sound < gate);
        // The feedback flash precedes the gate; only the new sequence follows it
        assert_eq!(flashed_symbols(&t.cues[gate..]), game.sequence);
    }

    #[test]
    fn test_timer_expiry_boundaries() {
        let mut game = SimonGame::new(30_000);
        game.level_started_at_ms = 10_000;
        assert!(!check_time_expired(&game, 10_000));
        assert!(!check_time_expired(&game, 39_999));
        assert!(check_time_expired(&game, 40_000));
    }

    #[test]
    fn test_submit_after_expiry_fails_even_if_correct() {
        let mut rng = seeded_rng();
        let mut game = started(&mut rng);
        let correct = game.sequence[0];
        let t = submit_symbol(&mut game, correct, LEVEL_TIME_BUDGET_MS, &mut rng);
        assert_eq!(t.outcome, SubmitOutcome::Failed(FailureReason::TimeExpired));
        assert_eq!(game.level, 1);
        assert_eq!(game.failures, 1);
        assert_eq!(game.level_started_at_ms, LEVEL_TIME_BUDGET_MS);
    }

    #[test]
    fn test_tick_times_out_mid_input() {
        let mut rng = seeded_rng();
        let mut game = started(&mut rng);
        for _ in 0..2 {
            clear_level(&mut game, &mut rng, 0);
            finish_replay(&mut game);
        }
        let symbol = game.sequence[0];
        submit_symbol(&mut game, symbol, 0, &mut rng);
        assert_eq!(game.input_index, 1);

        let start = game.level_started_at_ms;
        assert!(tick(&mut game, start + 29_999, &mut rng).is_none());
        let t = tick(&mut game, start + 30_000, &mut rng).expect("timeout");
        assert_eq!(t.outcome, SubmitOutcome::Failed(FailureReason::TimeExpired));
        assert_eq!(game.level, 1);
        assert_eq!(game.sequence.len(), 1);
        assert!(matches!(&t.cues[0], Cue::Message { text, .. } if text == "Time's up!"));
    }

    #[test]
    fn test_tick_does_nothing_during_replay() {
        let mut rng = seeded_rng();
        let mut game = SimonGame::default();
        start_new_game(&mut game, &mut rng, 0);
        assert!(tick(&mut game, 1_000_000, &mut rng).is_none());
        assert_eq!(game.phase, SimonPhase::ReplayingSequence);
    }

    #[test]
    fn test_completing_level_ten_wins() {
        let mut rng = seeded_rng();
        let mut game = started(&mut rng);
        for _ in 1..MAX_LEVELS {
            clear_level(&mut game, &mut rng, 0);
            finish_replay(&mut game);
        }
        assert_eq!(game.level, 10);
        let t = clear_level(&mut game, &mut rng, 0);

        assert_eq!(t.outcome, SubmitOutcome::LevelComplete);
        assert_eq!(game.level, 11);
        assert_eq!(game.phase, SimonPhase::GameWon);
        assert!(!game.running);
        assert_eq!(game.sequence.len(), MAX_SEQUENCE_LENGTH);
        assert!(matches!(t.cues.last(), Some(Cue::Message { style: MessageStyle::Victory, .. })));

        // Nothing grows or listens after the win
        let t = submit_symbol(&mut game, Symbol::Red, 0, &mut rng);
        assert_eq!(t.outcome, SubmitOutcome::Ignored);
        assert_eq!(game.sequence.len(), MAX_SEQUENCE_LENGTH);
    }

    #[test]
    fn test_quit_keeps_win() {
        let mut game = SimonGame::default();
        game.phase = SimonPhase::GameWon;
        quit(&mut game);
        assert_eq!(game.phase, SimonPhase::GameWon);
        assert!(!game.running);
    }

    #[test]
    fn test_quit_mid_replay() {
        let mut rng = seeded_rng();
        let mut game = SimonGame::default();
        start_new_game(&mut game, &mut rng, 0);
        quit(&mut game);
        assert_eq!(game.phase, SimonPhase::GameOver);
        assert!(!game.playing_sequence);
        assert!(!game.running);
        assert!(game.is_finished());
    }

    #[test]
    fn test_restart_level_clock() {
        let mut game = SimonGame::default();
        restart_level_clock(&mut game, 777);
        assert_eq!(game.level_started_at_ms, 777);
    }

    #[test]
    fn test_retry_sequence_is_fresh_draw() {
        // A failed run regenerates from empty rather than replaying the old first symbol
        let mut rng = seeded_rng();
        let mut game = started(&mut rng);
        let mut firsts = Vec::new();
        for _ in 0..12 {
            firsts.push(game.sequence[0]);
            let symbol = wrong_for(game.sequence[0]);
            submit_symbol(&mut game, symbol, 0, &mut rng);
            finish_replay(&mut game);
        }
        firsts.sort_by_key(|s| s.index());
        firsts.dedup();
        assert!(firsts.len() > 1);
    }
}
