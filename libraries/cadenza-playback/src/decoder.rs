//! Symphonia-backed decoder
//!
//! Opens any container Symphonia can probe (MP3, FLAC, OGG, WAV, AAC, ...)
//! and streams its default track as interleaved f32 at the file's native
//! sample rate and channel count. Nothing is resampled or remixed here.

use crate::error::{PlaybackError, Result};
use crate::source::{AudioChunk, FrameSource, MediaDecoder, StreamSpec};
use std::fs::File;
use std::path::{Path, PathBuf};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, SeekMode, SeekTo};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::{Time, TimeBase};

/// Default [`MediaDecoder`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaDecoder;

impl MediaDecoder for SymphoniaDecoder {
    fn open(&self, path: &Path) -> Result<Box<dyn FrameSource>> {
        Ok(Box::new(SymphoniaSource::open(path)?))
    }
}

/// Streaming decoder for one file
pub struct SymphoniaSource {
    path: PathBuf,
    format_reader: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    time_base: Option<TimeBase>,
    spec: StreamSpec,
    sample_buf: Option<SampleBuffer<f32>>,
    /// Frames still to discard after an accurate seek
    skip_frames: u64,
    is_eof: bool,
}

impl SymphoniaSource {
    /// Probe `path` and prepare its default track for decoding
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = File::open(&path).map_err(|e| PlaybackError::unavailable(&path, e))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| PlaybackError::unavailable(&path, format!("unrecognized format: {e}")))?;

        let format_reader = probed.format;

        let track = format_reader
            .default_track()
            .filter(|track| track.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| PlaybackError::unavailable(&path, "no audio track"))?;

        let sample_rate = track.codec_params.sample_rate.unwrap_or(44100);
        let channels = track
            .codec_params
            .channels
            .map(|c| c.count())
            .unwrap_or(2) as u16;
        let track_id = track.id;
        let time_base = track.codec_params.time_base;

        let decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| PlaybackError::unavailable(&path, format!("unsupported codec: {e}")))?;

        tracing::debug!(
            path = %path.display(),
            sample_rate,
            channels,
            "opened audio file"
        );

        Ok(Self {
            path,
            format_reader,
            decoder,
            track_id,
            time_base,
            spec: StreamSpec {
                sample_rate,
                channels,
            },
            sample_buf: None,
            skip_frames: 0,
            is_eof: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the track's timestamps are plain frame counts
    fn counts_frames(&self) -> bool {
        match self.time_base {
            Some(tb) => tb.numer == 1 && tb.denom == self.spec.sample_rate,
            None => true,
        }
    }

    fn frame_to_ts(&self, frame: u64) -> u64 {
        if self.counts_frames() {
            return frame;
        }
        let rate = u64::from(self.spec.sample_rate.max(1));
        let time = Time::new(frame / rate, (frame % rate) as f64 / rate as f64);
        self.time_base.map_or(frame, |tb| tb.calc_timestamp(time))
    }

    fn ts_to_frames(&self, ts: u64) -> u64 {
        if self.counts_frames() {
            return ts;
        }
        let rate = u64::from(self.spec.sample_rate);
        self.time_base.map_or(ts, |tb| {
            let time = tb.calc_time(ts);
            time.seconds * rate + (time.frac * rate as f64).round() as u64
        })
    }
}

impl FrameSource for SymphoniaSource {
    fn spec(&self) -> StreamSpec {
        self.spec
    }

    fn seek_to_frame(&mut self, frame: u64) -> Result<()> {
        let seeked = self
            .format_reader
            .seek(
                SeekMode::Accurate,
                SeekTo::TimeStamp {
                    ts: self.frame_to_ts(frame),
                    track_id: self.track_id,
                },
            )
            .map_err(|e| PlaybackError::Decode(format!("seek to frame {frame} failed: {e}")))?;

        // Reset decoder state
        self.decoder.reset();

        // The reader lands on a packet boundary at or before the target
        self.skip_frames = self.ts_to_frames(seeked.required_ts.saturating_sub(seeked.actual_ts));
        self.is_eof = false;

        tracing::trace!(
            frame,
            actual_ts = seeked.actual_ts,
            skip_frames = self.skip_frames,
            "seeked"
        );

        Ok(())
    }

    fn next_chunk(&mut self) -> Result<Option<AudioChunk>> {
        loop {
            if self.is_eof {
                return Ok(None);
            }

            let packet = match self.format_reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    self.is_eof = true;
                    return Ok(None);
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => {
                    return Err(PlaybackError::Decode(format!("error reading packet: {e}")));
                }
            };

            // Skip packets from other tracks
            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(msg)) => {
                    // Corrupt packet: drop it and keep going
                    tracing::warn!(
                        path = %self.path.display(),
                        "skipping undecodable packet: {msg}"
                    );
                    continue;
                }
                Err(e) => return Err(PlaybackError::Decode(e.to_string())),
            };

            let frames = decoded.frames() as u64;
            if frames == 0 {
                continue;
            }

            let signal_spec = *decoded.spec();
            let channels = signal_spec.channels.count();
            let needed = decoded.capacity() * channels;

            let reusable = matches!(&self.sample_buf, Some(buf) if buf.capacity() >= needed);
            if !reusable {
                self.sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, signal_spec));
            }
            let Some(buf) = self.sample_buf.as_mut() else {
                continue;
            };
            buf.copy_interleaved_ref(decoded);

            let mut samples = buf.samples();
            if self.skip_frames > 0 {
                let skip = self.skip_frames.min(frames);
                self.skip_frames -= skip;
                samples = &samples[(skip as usize * channels).min(samples.len())..];
            }
            if samples.is_empty() {
                continue;
            }

            return Ok(Some(AudioChunk::new(samples.to_vec(), channels as u16)));
        }
    }
}
