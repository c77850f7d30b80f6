//! Live playback on the default output device via rodio.
//!
//! Built with the `live-audio` feature (on by default). Without it,
//! [`DeviceSink::open`] always fails and callers fall back to a silent sink.

use super::sink::AudioSink;
use std::io;

#[cfg(feature = "live-audio")]
use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Source};

/// Plays each buffer on the default output device. Buffers are mixed, so a
/// sound started while another is still playing overlaps it.
#[cfg(feature = "live-audio")]
pub struct DeviceSink {
    // Dropping the stream stops all playback
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sample_rate_hz: u32,
}

#[cfg(not(feature = "live-audio"))]
pub struct DeviceSink;

impl DeviceSink {
    #[cfg(feature = "live-audio")]
    pub fn open(sample_rate_hz: u32) -> io::Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e.to_string()))?;
        log::info!("audio output opened at {} Hz", sample_rate_hz);
        Ok(Self {
            _stream: stream,
            handle,
            sample_rate_hz,
        })
    }

    #[cfg(not(feature = "live-audio"))]
    pub fn open(_sample_rate_hz: u32) -> io::Result<Self> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "built without live audio",
        ))
    }
}

impl AudioSink for DeviceSink {
    #[cfg(feature = "live-audio")]
    fn play(&mut self, samples: &[i16]) {
        if samples.is_empty() {
            return;
        }
        let buffer = SamplesBuffer::new(1, self.sample_rate_hz, samples.to_vec());
        if let Err(e) = self.handle.play_raw(buffer.convert_samples()) {
            log::warn!("audio playback failed: {}", e);
        }
    }

    #[cfg(not(feature = "live-audio"))]
    fn play(&mut self, _samples: &[i16]) {}
}
