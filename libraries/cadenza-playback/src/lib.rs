//! Cadenza Playback
//!
//! One playback session per process: play, pause, resume and stop a single
//! audio path, with pause recording the exact frame to resume from.
//!
//! # Architecture
//!
//! - `PlaybackController` owns the session and at most one decode task
//! - Each decode task is a thread that owns the output sink for its lifetime
//! - Decoding and output sit behind the `MediaDecoder` / `OutputDevice` traits
//! - `SymphoniaDecoder` decodes files; `NullDevice` and (with the
//!   `device-output` feature) `CpalDevice` play them
//!
//! # Example
//!
//! ```rust,no_run
//! use cadenza_playback::{NullDevice, PlaybackController, PlaybackState, SymphoniaDecoder};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), cadenza_playback::PlaybackError> {
//! let controller = PlaybackController::new(
//!     Arc::new(SymphoniaDecoder),
//!     Arc::new(NullDevice::paced()),
//! );
//!
//! controller.play("/music/song.flac")?;
//! controller.pause();
//! let paused_at = controller.session().frame_offset;
//!
//! controller.resume()?;
//! assert_eq!(controller.state(), PlaybackState::Playing);
//! # let _ = paused_at;
//! # Ok(())
//! # }
//! ```

mod controller;
mod decoder;
pub mod error;
mod events;
mod output;
pub mod source;
mod task;
pub mod types;

pub use controller::PlaybackController;
pub use decoder::{SymphoniaDecoder, SymphoniaSource};
pub use error::{PlaybackError, Result};
#[cfg(feature = "device-output")]
pub use output::CpalDevice;
pub use output::NullDevice;
pub use source::{AudioChunk, AudioSink, FrameSource, MediaDecoder, OutputDevice, StreamSpec};
pub use task::TaskExit;
pub use types::{PlaybackEvent, PlaybackSession, PlaybackState};
