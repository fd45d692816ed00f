//! Core types for playback

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Transport state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing loaded
    #[default]
    Stopped,

    /// A decode task is running
    Playing,

    /// Halted mid-track, position recorded
    Paused,
}

/// What is loaded and where it stands
///
/// There is one session per controller. Only the controller mutates it;
/// callers get snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSession {
    /// Audio path of the loaded track
    pub current_path: Option<PathBuf>,

    /// Frames delivered to the output when playback last halted
    pub frame_offset: u64,

    pub state: PlaybackState,
}

/// Events emitted by the controller and its decode tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged { state: PlaybackState },

    /// Track reached its end
    TrackFinished {
        path: PathBuf,
        /// Frames delivered in total
        frames: u64,
    },

    /// Playback failed; the session is (or will be) Stopped
    Error { path: PathBuf, message: String },
}
