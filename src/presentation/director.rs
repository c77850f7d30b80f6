//! Paces cue scripts against a clock.
//!
//! Cues are expanded into primitive steps. Instant steps run as soon as they
//! reach the front of the queue; waits hold the queue until their deadline.
//! Each wait starts where the previous one ended, so a coarse tick rate never
//! stretches a replay.

use super::cue::{Cue, MessageStyle};
use super::renderer::Renderer;
use crate::audio::{AudioSink, SoundCue, ToneBank};
use crate::simon::Symbol;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Show { text: String, style: MessageStyle },
    ClearMessage,
    Play(SoundCue),
    Highlight(Symbol),
    Unhighlight(Symbol),
    Wait(u64),
    AwaitClick,
    StartLevelClock,
}

#[derive(Debug, Default)]
pub struct Director {
    steps: VecDeque<Step>,
    /// End of the last completed wait; `None` once the queue has drained.
    anchor: Option<u64>,
    /// Deadline of the wait at the front of the queue.
    deadline: Option<u64>,
    lit: Vec<Symbol>,
    /// When the latest replay began, until the driver collects it.
    level_clock_start: Option<u64>,
}

impl Director {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cue script after whatever is already queued.
    pub fn enqueue(&mut self, cues: Vec<Cue>) {
        for cue in cues {
            match cue {
                Cue::Message {
                    text,
                    style,
                    hold_ms,
                } => {
                    self.steps.push_back(Step::Show { text, style });
                    self.steps.push_back(Step::Wait(hold_ms));
                    self.steps.push_back(Step::ClearMessage);
                }
                Cue::Sound(sound) => self.steps.push_back(Step::Play(sound)),
                Cue::Flash {
                    symbol,
                    on_ms,
                    gap_ms,
                } => {
                    self.steps.push_back(Step::Highlight(symbol));
                    self.steps.push_back(Step::Wait(on_ms));
                    self.steps.push_back(Step::Unhighlight(symbol));
                    if gap_ms > 0 {
                        self.steps.push_back(Step::Wait(gap_ms));
                    }
                }
                Cue::Pause(ms) => self.steps.push_back(Step::Wait(ms)),
                Cue::AwaitClick { prompt } => {
                    self.steps.push_back(Step::Show {
                        text: prompt,
                        style: MessageStyle::Prompt,
                    });
                    self.steps.push_back(Step::AwaitClick);
                    self.steps.push_back(Step::ClearMessage);
                }
                Cue::StartLevelClock => self.steps.push_back(Step::StartLevelClock),
            }
        }
    }

    /// Run every step that is due at `now_ms`.
    pub fn update<V, A>(&mut self, now_ms: u64, renderer: &mut V, audio: &mut A, bank: &ToneBank)
    where
        V: Renderer + ?Sized,
        A: AudioSink + ?Sized,
    {
        loop {
            let Some(step) = self.steps.pop_front() else {
                self.anchor = None;
                return;
            };
            match step {
                Step::Wait(ms) => {
                    let deadline = match self.deadline {
                        Some(deadline) => deadline,
                        None => {
                            let deadline = self.anchor.unwrap_or(now_ms).saturating_add(ms);
                            self.deadline = Some(deadline);
                            deadline
                        }
                    };
                    if now_ms < deadline {
                        self.steps.push_front(Step::Wait(ms));
                        return;
                    }
                    self.anchor = Some(deadline);
                    self.deadline = None;
                }
                Step::AwaitClick => {
                    self.steps.push_front(Step::AwaitClick);
                    return;
                }
                Step::Show { text, style } => renderer.draw_message(&text, style),
                Step::ClearMessage => renderer.clear_message(),
                Step::StartLevelClock => {
                    self.level_clock_start = Some(self.anchor.unwrap_or(now_ms));
                }
                Step::Play(sound) => play(audio, bank, sound),
                Step::Highlight(symbol) => {
                    renderer.highlight_symbol(symbol);
                    self.lit.push(symbol);
                    play(audio, bank, SoundCue::Button(symbol));
                }
                Step::Unhighlight(symbol) => {
                    renderer.unhighlight_symbol(symbol);
                    if let Some(pos) = self.lit.iter().position(|&s| s == symbol) {
                        self.lit.remove(pos);
                    }
                }
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        self.steps.is_empty()
    }

    /// True while the script is held at a click-to-continue prompt.
    pub fn is_awaiting_click(&self) -> bool {
        matches!(self.steps.front(), Some(Step::AwaitClick))
    }

    /// Release a click gate. Steps after it are timed from the next update.
    pub fn acknowledge_click(&mut self) -> bool {
        if !self.is_awaiting_click() {
            return false;
        }
        self.steps.pop_front();
        self.anchor = None;
        true
    }

    /// Scheduled start of the most recent replay, if one began since the
    /// last call.
    pub fn take_level_clock_start(&mut self) -> Option<u64> {
        self.level_clock_start.take()
    }

    /// Drop the rest of the script and leave the board dark.
    pub fn cancel<V: Renderer + ?Sized>(&mut self, renderer: &mut V) {
        self.steps.clear();
        self.anchor = None;
        self.deadline = None;
        self.level_clock_start = None;
        for symbol in self.lit.drain(..) {
            renderer.unhighlight_symbol(symbol);
        }
        renderer.clear_message();
    }

    /// Symbols currently lit by the script.
    pub fn lit(&self) -> &[Symbol] {
        &self.lit
    }
}

fn play<A: AudioSink + ?Sized>(audio: &mut A, bank: &ToneBank, sound: SoundCue) {
    let samples = bank.samples(sound);
    if !samples.is_empty() {
        audio.play(&samples);
    }
}
