//! Audio output seams.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Fire-and-forget playback of a sample buffer.
pub trait AudioSink {
    fn play(&mut self, samples: &[i16]);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _samples: &[i16]) {}
}

/// Collects played buffers in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub played: Vec<Vec<i16>>,
}

impl AudioSink for MemorySink {
    fn play(&mut self, samples: &[i16]) {
        self.played.push(samples.to_vec());
    }
}

/// Plays every buffer into each inner sink in turn.
pub struct FanOut<'a> {
    sinks: Vec<&'a mut dyn AudioSink>,
}

impl<'a> FanOut<'a> {
    pub fn new(sinks: Vec<&'a mut dyn AudioSink>) -> Self {
        Self { sinks }
    }
}

impl AudioSink for FanOut<'_> {
    fn play(&mut self, samples: &[i16]) {
        for sink in self.sinks.iter_mut() {
            sink.play(samples);
        }
    }
}

fn wav_spec(sample_rate_hz: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate: sample_rate_hz,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

fn to_io_error(e: hound::Error) -> io::Error {
    match e {
        hound::Error::IoError(err) => err,
        other => io::Error::new(io::ErrorKind::Other, other),
    }
}

/// Write one buffer as a complete mono 16-bit WAV file.
pub fn write_wav(path: &Path, samples: &[i16], sample_rate_hz: u32) -> io::Result<()> {
    let mut writer = hound::WavWriter::create(path, wav_spec(sample_rate_hz)).map_err(to_io_error)?;
    for &sample in samples {
        writer.write_sample(sample).map_err(to_io_error)?;
    }
    writer.finalize().map_err(to_io_error)
}

/// Appends every played buffer to one WAV file, back to back.
///
/// A write failure disables the recorder for the rest of the session.
pub struct WavRecorder {
    writer: Option<hound::WavWriter<BufWriter<File>>>,
    path: PathBuf,
    samples_written: u64,
}

impl WavRecorder {
    pub fn create(path: impl Into<PathBuf>, sample_rate_hz: u32) -> io::Result<Self> {
        let path = path.into();
        let writer =
            hound::WavWriter::create(&path, wav_spec(sample_rate_hz)).map_err(to_io_error)?;
        log::info!("recording audio to {}", path.display());
        Ok(Self {
            writer: Some(writer),
            path,
            samples_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }

    /// Flush the header and close the file.
    pub fn finish(mut self) -> io::Result<()> {
        match self.writer.take() {
            Some(writer) => writer.finalize().map_err(to_io_error),
            None => Ok(()),
        }
    }
}

impl AudioSink for WavRecorder {
    fn play(&mut self, samples: &[i16]) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        for &sample in samples {
            if let Err(e) = writer.write_sample(sample) {
                log::warn!(
                    "audio recording to {} stopped: {}",
                    self.path.display(),
                    e
                );
                self.writer = None;
                return;
            }
        }
        self.samples_written += samples.len() as u64;
    }
}
