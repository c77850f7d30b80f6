//! Square-wave sound synthesis and audio sinks.

#![allow(unused_imports)]

pub mod device;
pub mod sink;
pub mod sounds;
pub mod tone;

pub use device::DeviceSink;
pub use sink::{write_wav, AudioSink, FanOut, MemorySink, NullSink, WavRecorder};
pub use sounds::{export_sounds, level_start_frequencies, SoundCue, ToneBank};
pub use tone::{synthesize_chord, synthesize_tone, SampleBuffer, ToneNote, ToneRequest};
