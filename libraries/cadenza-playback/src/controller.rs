//! Playback controller
//!
//! Owns the single `PlaybackSession` and at most one decode task. Every
//! operation takes the session lock for its whole duration, so overlapping
//! calls from different threads are applied one after another and a new task
//! is never started before the previous one has been joined.

use crate::error::{PlaybackError, Result};
use crate::events::EventBus;
use crate::source::{MediaDecoder, OutputDevice};
use crate::task::{DecodeTask, TaskExit};
use crate::types::{PlaybackEvent, PlaybackSession, PlaybackState};
use cadenza_core::Song;
use crossbeam_channel::Receiver;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct Inner {
    session: PlaybackSession,
    task: Option<DecodeTask>,
}

/// Start/pause/resume/stop for one audio output
///
/// Construct one per process and share it (`Arc<PlaybackController>`); all
/// methods take `&self`.
pub struct PlaybackController {
    decoder: Arc<dyn MediaDecoder>,
    device: Arc<dyn OutputDevice>,
    inner: Mutex<Inner>,
    events: EventBus,
}

impl PlaybackController {
    pub fn new(decoder: Arc<dyn MediaDecoder>, device: Arc<dyn OutputDevice>) -> Self {
        Self {
            decoder,
            device,
            inner: Mutex::new(Inner {
                session: PlaybackSession::default(),
                task: None,
            }),
            events: EventBus::default(),
        }
    }

    /// Play `path` from its first frame
    ///
    /// Any running task is halted and joined first. If the path cannot be
    /// opened the session ends up Stopped and `ResourceUnavailable` is returned.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn play(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut inner = self.lock();
        self.reconcile(&mut inner);

        if let Some(task) = inner.task.take() {
            let exit = task.halt();
            tracing::debug!(frame = exit.frame(), "superseded running track");
        }

        inner.session.current_path = Some(path.to_path_buf());
        inner.session.frame_offset = 0;

        match self.start_task(path, 0) {
            Ok(task) => {
                inner.task = Some(task);
                self.transition(&mut inner, PlaybackState::Playing);
                tracing::info!(path = %path.display(), "playing");
                Ok(())
            }
            Err(err) => Err(self.fail(&mut inner, path, err)),
        }
    }

    /// Play a catalog song by its audio path
    pub fn play_song(&self, song: &Song) -> Result<()> {
        tracing::debug!(song_id = song.id, title = %song.title, "play song");
        self.play(&song.audio_path)
    }

    /// Halt playback and record where it stopped
    ///
    /// Blocks until the decode task reports its final frame. No-op unless
    /// Playing.
    #[tracing::instrument(skip(self))]
    pub fn pause(&self) {
        let mut inner = self.lock();
        self.reconcile(&mut inner);

        if inner.session.state != PlaybackState::Playing {
            return;
        }

        let Some(task) = inner.task.take() else {
            self.clear(&mut inner);
            return;
        };

        match task.halt() {
            TaskExit::Halted { frame } => {
                inner.session.frame_offset = frame;
                self.transition(&mut inner, PlaybackState::Paused);
                tracing::info!(frame, "paused");
            }
            // Ended on its own just before the halt landed
            TaskExit::Finished { .. } | TaskExit::Failed { .. } => self.clear(&mut inner),
        }
    }

    /// Continue a paused track from the recorded frame
    ///
    /// No-op unless Paused with a track loaded.
    #[tracing::instrument(skip(self))]
    pub fn resume(&self) -> Result<()> {
        let mut inner = self.lock();
        self.reconcile(&mut inner);

        if inner.session.state != PlaybackState::Paused {
            return Ok(());
        }
        let Some(path) = inner.session.current_path.clone() else {
            return Ok(());
        };

        let frame = inner.session.frame_offset;
        match self.start_task(&path, frame) {
            Ok(task) => {
                inner.task = Some(task);
                self.transition(&mut inner, PlaybackState::Playing);
                tracing::info!(frame, "resumed");
                Ok(())
            }
            Err(err) => Err(self.fail(&mut inner, &path, err)),
        }
    }

    /// Halt playback and forget the track and position
    #[tracing::instrument(skip(self))]
    pub fn stop(&self) {
        let mut inner = self.lock();

        if let Some(task) = inner.task.take() {
            task.halt();
        }

        self.clear(&mut inner);
    }

    pub fn state(&self) -> PlaybackState {
        let mut inner = self.lock();
        self.reconcile(&mut inner);
        inner.session.state
    }

    /// Snapshot of the current session
    pub fn session(&self) -> PlaybackSession {
        let mut inner = self.lock();
        self.reconcile(&mut inner);
        inner.session.clone()
    }

    /// Subscribe to state changes, track ends and failures
    ///
    /// Each call returns a fresh receiver that sees every event published
    /// from now on. Drop it to unsubscribe; events are only queued for live
    /// receivers.
    pub fn events(&self) -> Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start_task(&self, path: &Path, frame: u64) -> Result<DecodeTask> {
        let mut source = self.decoder.open(path).map_err(|e| e.for_resource(path))?;

        if frame > 0 {
            source.seek_to_frame(frame).map_err(|e| e.for_resource(path))?;
        }

        let sink = self.device.open(source.spec())?;
        DecodeTask::spawn(path, source, sink, frame, self.events.clone())
    }

    /// Settle a task that ended on its own since the last call
    fn reconcile(&self, inner: &mut Inner) {
        if !inner.task.as_ref().is_some_and(DecodeTask::is_finished) {
            return;
        }

        if let Some(task) = inner.task.take() {
            let path = task.path().to_path_buf();
            let exit = task.join();
            tracing::debug!(
                path = %path.display(),
                frame = exit.frame(),
                "reconciled finished task"
            );
            self.clear(inner);
        }
    }

    /// Reset to Stopped after a failed start and report it
    fn fail(&self, inner: &mut Inner, path: &Path, err: PlaybackError) -> PlaybackError {
        tracing::warn!(path = %path.display(), "playback failed to start: {err}");

        self.clear(inner);
        self.events.publish(PlaybackEvent::Error {
            path: path.to_path_buf(),
            message: err.to_string(),
        });

        err
    }

    fn clear(&self, inner: &mut Inner) {
        inner.session.current_path = None;
        inner.session.frame_offset = 0;
        self.transition(inner, PlaybackState::Stopped);
    }

    fn transition(&self, inner: &mut Inner, state: PlaybackState) {
        if inner.session.state == state {
            return;
        }
        inner.session.state = state;
        self.events.publish(PlaybackEvent::StateChanged { state });
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = inner.task.take() {
            task.halt();
        }
    }
}
