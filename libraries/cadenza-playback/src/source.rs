//! Decoder and output seams
//!
//! The controller only talks to these traits. `SymphoniaDecoder` and the
//! devices in `output` are the shipped implementations; tests plug in their own.

use crate::error::Result;
use std::path::Path;

/// Stream format of a decoded source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSpec {
    /// Native sample rate in Hz
    pub sample_rate: u32,

    /// Interleaved channel count
    pub channels: u16,
}

/// A run of interleaved f32 samples in [-1.0, 1.0]
#[derive(Debug, Clone, PartialEq)]
pub struct AudioChunk {
    pub samples: Vec<f32>,
    pub channels: u16,
}

impl AudioChunk {
    pub fn new(samples: Vec<f32>, channels: u16) -> Self {
        Self { samples, channels }
    }

    /// Number of sample frames (one sample per channel)
    pub fn frames(&self) -> u64 {
        (self.samples.len() / usize::from(self.channels.max(1))) as u64
    }
}

/// Opens audio paths for decoding
pub trait MediaDecoder: Send + Sync {
    /// Open `path` positioned at frame 0
    ///
    /// Unreadable or undecodable paths fail with `ResourceUnavailable`.
    fn open(&self, path: &Path) -> Result<Box<dyn FrameSource>>;
}

/// A decoded, seekable stream of frames
pub trait FrameSource: Send {
    fn spec(&self) -> StreamSpec;

    /// Position the stream so the next chunk starts exactly at `frame`
    fn seek_to_frame(&mut self, frame: u64) -> Result<()>;

    /// Next chunk of audio, `None` at end of stream
    fn next_chunk(&mut self) -> Result<Option<AudioChunk>>;
}

/// Opens output streams
pub trait OutputDevice: Send + Sync {
    fn open(&self, spec: StreamSpec) -> Result<Box<dyn AudioSink>>;
}

/// An open output stream
///
/// Held by exactly one decode task; dropping it releases the device.
pub trait AudioSink: Send {
    /// Queue a chunk for output, blocking while the device is saturated
    fn write(&mut self, chunk: &AudioChunk) -> Result<()>;

    /// Wait for queued audio to be played out
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Drop audio that was queued but not yet played
    ///
    /// Returns the number of frames dropped. Sinks that play synchronously
    /// have nothing queued.
    fn discard(&mut self) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_frames_count_per_channel() {
        assert_eq!(AudioChunk::new(vec![0.0; 8], 2).frames(), 4);
        assert_eq!(AudioChunk::new(vec![0.0; 8], 1).frames(), 8);
        assert_eq!(AudioChunk::new(Vec::new(), 2).frames(), 0);
    }
}
