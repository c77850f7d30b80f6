//! Square-wave PCM synthesis.
//!
//! Buffers are signed 16-bit mono samples. Each sample is `+amplitude` for
//! the first half of every period and `-amplitude` for the second half, with
//! `period = round(sample_rate / frequency)` samples.

/// Mono signed 16-bit samples.
pub type SampleBuffer = Vec<i16>;

/// Number of samples covering `duration_ms` at `sample_rate_hz`.
pub fn sample_count(duration_ms: u64, sample_rate_hz: u32) -> usize {
    (sample_rate_hz as u64 * duration_ms / 1000) as usize
}

/// Square-wave period in samples, or `None` when the frequency cannot be
/// rendered (non-positive, non-finite, or too high for a two-sample period).
pub fn square_period(frequency_hz: f64, sample_rate_hz: u32) -> Option<usize> {
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 || sample_rate_hz == 0 {
        return None;
    }
    let period = (sample_rate_hz as f64 / frequency_hz).round();
    if period < 2.0 {
        return None;
    }
    Some(period as usize)
}

/// Append `count` square-wave samples, phase restarting at the first one.
fn push_square(buffer: &mut SampleBuffer, period: usize, count: usize, amplitude: i16) {
    let half = period / 2;
    let low = amplitude.saturating_neg();
    buffer.extend((0..count).map(|i| if i % period < half { amplitude } else { low }));
}

/// Synthesize a single square-wave tone.
///
/// Returns an empty buffer for an unusable frequency, a zero duration or a
/// zero sample rate; sound is never allowed to fail the caller.
pub fn synthesize_tone(
    frequency_hz: f64,
    duration_ms: u64,
    sample_rate_hz: u32,
    amplitude: i16,
) -> SampleBuffer {
    let count = sample_count(duration_ms, sample_rate_hz);
    let Some(period) = square_period(frequency_hz, sample_rate_hz) else {
        return Vec::new();
    };
    let mut buffer = Vec::with_capacity(count);
    push_square(&mut buffer, period, count, amplitude);
    buffer
}

/// Synthesize consecutive tones splitting `total_ms` into equal segments.
///
/// Every segment is `total_samples / frequencies.len()` samples long and
/// restarts its own square-wave phase. An unusable frequency leaves its
/// segment silent, and integer remainder samples at the end are silence, so
/// the buffer always spans exactly `total_ms`.
pub fn synthesize_chord(
    frequencies: &[f64],
    total_ms: u64,
    sample_rate_hz: u32,
    amplitude: i16,
) -> SampleBuffer {
    let weighted: Vec<(f64, u32)> = frequencies.iter().map(|&f| (f, 1)).collect();
    synthesize_weighted(&weighted, total_ms, sample_rate_hz, amplitude)
}

/// Synthesize consecutive tones whose segment lengths follow integer weights.
pub fn synthesize_weighted(
    notes: &[(f64, u32)],
    total_ms: u64,
    sample_rate_hz: u32,
    amplitude: i16,
) -> SampleBuffer {
    let total = sample_count(total_ms, sample_rate_hz);
    let weight_sum: u64 = notes.iter().map(|&(_, w)| w as u64).sum();
    if total == 0 || weight_sum == 0 {
        return Vec::new();
    }

    let mut buffer = Vec::with_capacity(total);
    for &(frequency, weight) in notes {
        let segment = (total as u64 * weight as u64 / weight_sum) as usize;
        match square_period(frequency, sample_rate_hz) {
            Some(period) => push_square(&mut buffer, period, segment, amplitude),
            None => buffer.resize(buffer.len() + segment, 0),
        }
    }
    buffer.resize(total, 0);
    buffer
}

/// One note of a [`ToneRequest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneNote {
    pub frequency_hz: f64,
    /// Relative share of the total duration.
    pub weight: u32,
}

/// A sound to synthesize: ordered notes sharing a total duration.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneRequest {
    pub notes: Vec<ToneNote>,
    pub duration_ms: u64,
}

impl ToneRequest {
    pub fn single(frequency_hz: f64, duration_ms: u64) -> Self {
        Self::run(&[frequency_hz], duration_ms)
    }

    /// Equal-length notes played back to back.
    pub fn run(frequencies: &[f64], duration_ms: u64) -> Self {
        Self {
            notes: frequencies
                .iter()
                .map(|&frequency_hz| ToneNote {
                    frequency_hz,
                    weight: 1,
                })
                .collect(),
            duration_ms,
        }
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.notes.iter().map(|n| n.frequency_hz).collect()
    }

    pub fn render(&self, sample_rate_hz: u32, amplitude: i16) -> SampleBuffer {
        if let [note] = self.notes.as_slice() {
            return synthesize_tone(note.frequency_hz, self.duration_ms, sample_rate_hz, amplitude);
        }
        let notes: Vec<(f64, u32)> = self
            .notes
            .iter()
            .map(|n| (n.frequency_hz, n.weight))
            .collect();
        synthesize_weighted(&notes, self.duration_ms, sample_rate_hz, amplitude)
    }
}
