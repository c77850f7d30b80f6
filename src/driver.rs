//! One frame of a Simon session.
//!
//! Input is applied to the state machine, the level timer is checked, the
//! director plays whatever is due, and the resting board is pushed to the
//! renderer. Nothing here sleeps; pacing comes from the injected clock.

use crate::audio::{AudioSink, ToneBank};
use crate::core::clock::Clock;
use crate::core::config::GameConfig;
use crate::presentation::{Director, InputEvent, InputSource, Renderer};
use crate::simon::{
    finish_replay, quit, restart_level_clock, shuffled_layout, start_new_game, submit_symbol,
    tick, ButtonLayout, ReplayTiming, SimonGame, SimonPhase, Symbol,
};
use rand::Rng;

/// Session state after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    /// All levels cleared and the victory message has finished.
    Won,
    Quit,
}

pub struct GameDriver<R: Rng, C: Clock> {
    game: SimonGame,
    director: Director,
    bank: ToneBank,
    rng: R,
    clock: C,
}

impl<R: Rng, C: Clock> GameDriver<R, C> {
    pub fn new(config: &GameConfig, mut rng: R, clock: C) -> Self {
        let layout = if config.shuffle_pads {
            shuffled_layout(&mut rng)
        } else {
            ButtonLayout::default()
        };
        log::debug!("pad layout: {:?}", layout.pads);

        let game = SimonGame::new(config.level_time_budget_ms())
            .with_layout(layout)
            .with_timing(ReplayTiming {
                flash_on_ms: config.flash_on_ms,
                flash_gap_ms: config.flash_gap_ms,
            });

        Self {
            game,
            director: Director::new(),
            bank: ToneBank::new(config.sample_rate, config.amplitude, config.muted),
            rng,
            clock,
        }
    }

    pub fn tick<I, V, A>(&mut self, input: &mut I, renderer: &mut V, audio: &mut A) -> TickStatus
    where
        I: InputSource + ?Sized,
        V: Renderer + ?Sized,
        A: AudioSink + ?Sized,
    {
        let now = self.clock.now_ms();

        while let Some(event) = input.poll_event() {
            match event {
                InputEvent::Quit | InputEvent::EscapePressed => {
                    self.director.cancel(renderer);
                    quit(&mut self.game);
                    return TickStatus::Quit;
                }
                InputEvent::SymbolClicked(symbol) => self.press(Some(symbol), now),
                InputEvent::Confirm => self.press(None, now),
            }
        }

        if let Some(transition) = tick(&mut self.game, now, &mut self.rng) {
            self.director.enqueue(transition.cues);
        }

        self.director.update(now, renderer, audio, &self.bank);
        if let Some(started_at) = self.director.take_level_clock_start() {
            restart_level_clock(&mut self.game, started_at);
        }
        if self.game.playing_sequence && self.director.is_idle() {
            finish_replay(&mut self.game);
        }

        renderer.draw_idle(self.game.display_level(), self.game.progress());
        renderer.draw_timer_bar(self.game.remaining_ms(now), self.game.time_budget_ms);

        match self.game.phase {
            SimonPhase::GameOver => TickStatus::Quit,
            SimonPhase::GameWon if self.director.is_idle() => TickStatus::Won,
            _ => TickStatus::Running,
        }
    }

    /// A click or key press. `None` is a press that is not on a pad.
    fn press(&mut self, symbol: Option<Symbol>, now: u64) {
        // The replay behind the gate restarts the level clock when it begins
        if self.director.acknowledge_click() {
            log::debug!("restart acknowledged");
            return;
        }

        match (self.game.phase, symbol) {
            (SimonPhase::AwaitingStart, _) => {
                let cues = start_new_game(&mut self.game, &mut self.rng, now);
                self.director.enqueue(cues);
            }
            (SimonPhase::AwaitingPlayerInput, Some(symbol)) => {
                let transition = submit_symbol(&mut self.game, symbol, now, &mut self.rng);
                log::debug!("{:?} -> {:?}", symbol, transition.outcome);
                self.director.enqueue(transition.cues);
            }
            _ => {}
        }
    }

    pub fn game(&self) -> &SimonGame {
        &self.game
    }

    pub fn director(&self) -> &Director {
        &self.director
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn tone_bank(&self) -> &ToneBank {
        &self.bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MemorySink;
    use crate::core::clock::ManualClock;
    use crate::presentation::BoardView;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::VecDeque;

    fn driver() -> GameDriver<ChaCha8Rng, ManualClock> {
        let config = GameConfig {
            shuffle_pads: false,
            muted: true,
            ..GameConfig::default()
        };
        GameDriver::new(&config, ChaCha8Rng::seed_from_u64(42), ManualClock::new(0))
    }

    #[test]
    fn test_waits_for_start() {
        let mut driver = driver();
        let mut board = BoardView::new();
        let mut audio = MemorySink::default();
        let mut input: VecDeque<InputEvent> = VecDeque::new();

        driver.clock().advance(100_000);
        assert_eq!(
            driver.tick(&mut input, &mut board, &mut audio),
            TickStatus::Running
        );
        assert_eq!(driver.game().phase, SimonPhase::AwaitingStart);
        assert!(driver.game().sequence.is_empty());
    }

    #[test]
    fn test_confirm_starts_replay() {
        let mut driver = driver();
        let mut board = BoardView::new();
        let mut audio = MemorySink::default();
        let mut input = VecDeque::from([InputEvent::Confirm]);

        driver.tick(&mut input, &mut board, &mut audio);
        assert_eq!(driver.game().phase, SimonPhase::ReplayingSequence);
        assert_eq!(board.message_text(), Some("Watch the sequence..."));
        assert_eq!(board.level, 1);
        assert_eq!(board.remaining_ms, 30_000);
    }

    #[test]
    fn test_level_clock_starts_with_replay_after_burst_of_presses() {
        let mut driver = driver();
        let mut board = BoardView::new();
        let mut audio = MemorySink::default();
        let mut input = VecDeque::from([InputEvent::Confirm]);
        driver.tick(&mut input, &mut board, &mut audio);

        for level in 2..=5 {
            for _ in 0..10_000 {
                if driver.game().accepts_input() {
                    break;
                }
                driver.clock().advance(16);
                driver.tick(&mut input, &mut board, &mut audio);
            }

            // The whole sequence lands in one tick; feedback flashes queue up
            let presses: Vec<InputEvent> = driver
                .game()
                .sequence
                .iter()
                .map(|&s| InputEvent::SymbolClicked(s))
                .collect();
            input.extend(presses);
            driver.tick(&mut input, &mut board, &mut audio);
            assert_eq!(driver.game().level, level);

            for _ in 0..10_000 {
                if board.message_text() == Some("Watch the sequence...") {
                    break;
                }
                driver.clock().advance(1);
                driver.tick(&mut input, &mut board, &mut audio);
            }
            assert_eq!(board.message_text(), Some("Watch the sequence..."));
            assert_eq!(driver.game().level_started_at_ms, driver.clock().now_ms());
            assert_eq!(board.remaining_ms, 30_000);
        }
    }

    #[test]
    fn test_escape_quits_from_start_screen() {
        let mut driver = driver();
        let mut board = BoardView::new();
        let mut audio = MemorySink::default();
        let mut input = VecDeque::from([InputEvent::EscapePressed, InputEvent::Confirm]);

        assert_eq!(
            driver.tick(&mut input, &mut board, &mut audio),
            TickStatus::Quit
        );
        assert_eq!(driver.game().phase, SimonPhase::GameOver);
    }

    #[test]
    fn test_unshuffled_layout_is_identity() {
        assert_eq!(driver().game().layout, ButtonLayout::default());
    }

    #[test]
    fn test_shuffled_layout_is_permutation() {
        let config = GameConfig::default();
        let driver = GameDriver::new(&config, ChaCha8Rng::seed_from_u64(7), ManualClock::new(0));
        let mut pads = driver.game().layout.pads.to_vec();
        pads.sort_by_key(|s| s.index());
        assert_eq!(pads, Symbol::ALL.to_vec());
    }
}
