//! Background decode task
//!
//! One thread per running track. It pulls chunks from a `FrameSource`, writes
//! them to the sink it owns, and checks its control channel between chunks.
//! The thread's return value carries the frame it stopped at, so joining the
//! task is the handoff that makes a paused position exact.

use crate::error::PlaybackError;
use crate::events::EventBus;
use crate::source::{AudioSink, FrameSource};
use crate::types::PlaybackEvent;
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

/// Commands sent to a decode task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TaskControl {
    /// Stop after the chunk in flight
    Halt,
}

/// How a decode task ended
#[derive(Debug)]
pub enum TaskExit {
    /// Halted on request
    Halted { frame: u64 },

    /// Source ran out
    Finished { frame: u64 },

    /// Source or sink failed
    Failed { frame: u64, error: PlaybackError },
}

impl TaskExit {
    /// Frames played, counted from the start of the track
    pub fn frame(&self) -> u64 {
        match self {
            Self::Halted { frame } | Self::Finished { frame } | Self::Failed { frame, .. } => {
                *frame
            }
        }
    }
}

pub(crate) struct DecodeTask {
    path: PathBuf,
    start_frame: u64,
    control_tx: Sender<TaskControl>,
    handle: JoinHandle<TaskExit>,
}

impl DecodeTask {
    /// Start decoding `source` into `sink` from `start_frame`
    ///
    /// Natural end and failures are announced on `events` by the task itself.
    pub fn spawn(
        path: &Path,
        source: Box<dyn FrameSource>,
        sink: Box<dyn AudioSink>,
        start_frame: u64,
        events: EventBus,
    ) -> Result<Self, PlaybackError> {
        let (control_tx, control_rx) = bounded(1);
        let task_path = path.to_path_buf();

        let handle = std::thread::Builder::new()
            .name("cadenza-decode".into())
            .spawn(move || {
                let exit = match run(source, sink, &control_rx, start_frame) {
                    TaskExit::Failed { frame, error } => TaskExit::Failed {
                        frame,
                        error: error.for_resource(&task_path),
                    },
                    exit => exit,
                };
                announce(&task_path, &exit, &events);
                exit
            })?;

        tracing::debug!(path = %path.display(), start_frame, "decode task started");

        Ok(Self {
            path: path.to_path_buf(),
            start_frame,
            control_tx,
            handle,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the thread has already returned
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Ask the task to stop and wait for its final position
    pub fn halt(self) -> TaskExit {
        // Fails only if the task already exited, which join reports anyway
        self.control_tx.try_send(TaskControl::Halt).ok();
        self.join()
    }

    /// Wait for the task to return
    pub fn join(self) -> TaskExit {
        let exit = self.handle.join().unwrap_or_else(|_| TaskExit::Failed {
            frame: self.start_frame,
            error: PlaybackError::TaskPanicked,
        });

        tracing::debug!(path = %self.path.display(), ?exit, "decode task joined");
        exit
    }
}

fn run(
    mut source: Box<dyn FrameSource>,
    mut sink: Box<dyn AudioSink>,
    control_rx: &Receiver<TaskControl>,
    mut frame: u64,
) -> TaskExit {
    loop {
        match control_rx.try_recv() {
            Ok(TaskControl::Halt) | Err(TryRecvError::Disconnected) => {
                // Audio still queued in the sink was never heard
                let dropped = sink.discard();
                return TaskExit::Halted {
                    frame: frame.saturating_sub(dropped),
                };
            }
            Err(TryRecvError::Empty) => {}
        }

        match source.next_chunk() {
            Ok(Some(chunk)) => {
                if let Err(error) = sink.write(&chunk) {
                    return TaskExit::Failed { frame, error };
                }
                frame += chunk.frames();
            }
            Ok(None) => {
                if let Err(error) = sink.flush() {
                    return TaskExit::Failed { frame, error };
                }
                return TaskExit::Finished { frame };
            }
            Err(error) => return TaskExit::Failed { frame, error },
        }
    }
}

fn announce(path: &Path, exit: &TaskExit, events: &EventBus) {
    let event = match exit {
        TaskExit::Halted { .. } => return,
        TaskExit::Finished { frame } => {
            tracing::info!(path = %path.display(), frames = frame, "track finished");
            PlaybackEvent::TrackFinished {
                path: path.to_path_buf(),
                frames: *frame,
            }
        }
        TaskExit::Failed { frame, error } => {
            tracing::error!(path = %path.display(), frame, "playback failed: {error}");
            PlaybackEvent::Error {
                path: path.to_path_buf(),
                message: error.to_string(),
            }
        }
    };

    events.publish(event);
}
