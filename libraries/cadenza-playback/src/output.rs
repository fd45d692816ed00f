//! Output devices
//!
//! `NullDevice` discards audio and is always available. `CpalDevice` plays
//! through the system's default output and needs the `device-output` feature.

use crate::error::Result;
use crate::source::{AudioChunk, AudioSink, OutputDevice, StreamSpec};
use crossbeam_channel::Receiver;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Device that swallows audio
///
/// With pacing enabled, writes block for as long as the audio would take to
/// play, so a headless session runs in real time.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDevice {
    paced: bool,
}

impl NullDevice {
    /// Discard audio as fast as it is decoded
    pub fn new() -> Self {
        Self { paced: false }
    }

    /// Discard audio at real-time speed
    pub fn paced() -> Self {
        Self { paced: true }
    }
}

impl OutputDevice for NullDevice {
    fn open(&self, spec: StreamSpec) -> Result<Box<dyn AudioSink>> {
        Ok(Box::new(NullSink {
            spec,
            paced: self.paced,
            started: Instant::now(),
            frames_written: 0,
        }))
    }
}

struct NullSink {
    spec: StreamSpec,
    paced: bool,
    started: Instant,
    frames_written: u64,
}

impl AudioSink for NullSink {
    fn write(&mut self, chunk: &AudioChunk) -> Result<()> {
        self.frames_written += chunk.frames();

        if self.paced {
            let elapsed = self.started.elapsed();
            let wait = pacing_delay(self.frames_written, self.spec.sample_rate, elapsed);
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
        }

        Ok(())
    }
}

/// How long to wait so that `frames` at `sample_rate` are not delivered
/// faster than real time
fn pacing_delay(frames: u64, sample_rate: u32, elapsed: Duration) -> Duration {
    if sample_rate == 0 {
        return Duration::ZERO;
    }
    let due = Duration::from_secs_f64(frames as f64 / f64::from(sample_rate));
    due.saturating_sub(elapsed)
}

/// Fill a device buffer from queued chunks, padding an underrun with silence
///
/// Returns how many queued samples went into `data`.
#[cfg_attr(not(feature = "device-output"), allow(dead_code))]
fn fill_from_queue(
    data: &mut [f32],
    pending: &mut VecDeque<f32>,
    queue: &Receiver<Vec<f32>>,
) -> usize {
    while pending.len() < data.len() {
        match queue.try_recv() {
            Ok(samples) => pending.extend(samples),
            Err(_) => break,
        }
    }

    let played = pending.len().min(data.len());
    for (slot, sample) in data.iter_mut().zip(pending.drain(..played)) {
        *slot = sample;
    }
    data[played..].fill(0.0);
    played
}

#[cfg(feature = "device-output")]
pub use self::cpal_output::CpalDevice;

#[cfg(feature = "device-output")]
mod cpal_output {
    //! CPAL output
    //!
    //! The CPAL `Stream` is not `Send` on every platform, so each sink owns a
    //! dedicated thread that builds the stream, keeps it alive, and drops it
    //! on shutdown. Samples reach the callback through a bounded channel,
    //! which also paces the decode task.

    use super::{fill_from_queue, AudioChunk, AudioSink, OutputDevice, Result, StreamSpec};
    use crate::error::PlaybackError;
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use crossbeam_channel::{bounded, Receiver, Sender};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::thread::JoinHandle;
    use std::time::Duration;

    /// Chunks queued ahead of the device
    const QUEUE_DEPTH: usize = 8;

    /// System default output device
    #[derive(Debug, Clone, Copy, Default)]
    pub struct CpalDevice;

    impl CpalDevice {
        pub fn new() -> Self {
            Self
        }
    }

    impl OutputDevice for CpalDevice {
        fn open(&self, spec: StreamSpec) -> Result<Box<dyn AudioSink>> {
            Ok(Box::new(CpalSink::open(spec)?))
        }
    }

    struct CpalSink {
        channels: u16,
        samples_tx: Option<Sender<Vec<f32>>>,
        shutdown_tx: Sender<()>,
        thread: Option<JoinHandle<()>>,
        /// Samples handed to the queue
        written: u64,
        /// Samples the callback has sent to the device
        played: Arc<AtomicU64>,
    }

    impl CpalSink {
        fn open(spec: StreamSpec) -> Result<Self> {
            let (samples_tx, samples_rx) = bounded::<Vec<f32>>(QUEUE_DEPTH);
            let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
            let (ready_tx, ready_rx) = bounded::<Result<()>>(1);
            let played = Arc::new(AtomicU64::new(0));
            let stream_played = Arc::clone(&played);

            let thread = std::thread::Builder::new()
                .name("cadenza-output".into())
                .spawn(move || {
                    let stream = match build_stream(spec, samples_rx, stream_played) {
                        Ok(stream) => {
                            ready_tx.send(Ok(())).ok();
                            stream
                        }
                        Err(e) => {
                            ready_tx.send(Err(e)).ok();
                            return;
                        }
                    };

                    // Keep the stream alive until the sink goes away
                    shutdown_rx.recv().ok();
                    drop(stream);
                })?;

            match ready_rx.recv() {
                Ok(Ok(())) => Ok(Self {
                    channels: spec.channels.max(1),
                    samples_tx: Some(samples_tx),
                    shutdown_tx,
                    thread: Some(thread),
                    written: 0,
                    played,
                }),
                Ok(Err(e)) => {
                    thread.join().ok();
                    Err(e)
                }
                Err(_) => {
                    thread.join().ok();
                    Err(PlaybackError::Output("output thread exited during setup".into()))
                }
            }
        }

        /// Stop the stream and wait for the output thread; idempotent
        fn close(&mut self) {
            self.samples_tx.take();
            self.shutdown_tx.send(()).ok();
            if let Some(thread) = self.thread.take() {
                thread.join().ok();
            }
        }
    }

    fn build_stream(
        spec: StreamSpec,
        samples_rx: Receiver<Vec<f32>>,
        played: Arc<AtomicU64>,
    ) -> Result<cpal::Stream> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| PlaybackError::Output("no default output device".into()))?;

        let config = cpal::StreamConfig {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let mut pending: VecDeque<f32> = VecDeque::new();
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let samples = fill_from_queue(data, &mut pending, &samples_rx);
                    played.fetch_add(samples as u64, Ordering::Relaxed);
                },
                |err| tracing::error!("audio stream error: {err}"),
                None,
            )
            .map_err(|e| PlaybackError::Output(format!("failed to build output stream: {e}")))?;

        stream
            .play()
            .map_err(|e| PlaybackError::Output(format!("failed to start output stream: {e}")))?;

        tracing::debug!(
            sample_rate = spec.sample_rate,
            channels = spec.channels,
            "output stream started"
        );

        Ok(stream)
    }

    impl AudioSink for CpalSink {
        fn write(&mut self, chunk: &AudioChunk) -> Result<()> {
            let Some(tx) = &self.samples_tx else {
                return Err(PlaybackError::Output("output stream closed".into()));
            };
            tx.send(chunk.samples.clone())
                .map_err(|_| PlaybackError::Output("output stream closed".into()))?;
            self.written += chunk.samples.len() as u64;
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            if let Some(tx) = &self.samples_tx {
                while !tx.is_empty() {
                    std::thread::sleep(Duration::from_millis(10));
                }
            }
            Ok(())
        }

        fn discard(&mut self) -> u64 {
            // Once the stream is gone the played count is final
            self.close();
            let unplayed = self.written.saturating_sub(self.played.load(Ordering::Relaxed));
            let frames = unplayed / u64::from(self.channels);
            tracing::debug!(frames, "discarded queued audio");
            frames
        }
    }

    impl Drop for CpalSink {
        fn drop(&mut self) {
            self.close();
        }
    }
}
