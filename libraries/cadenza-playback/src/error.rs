//! Error types for playback

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Audio path could not be opened or decoded
    #[error("Resource unavailable: {}: {reason}", .path.display())]
    ResourceUnavailable { path: PathBuf, reason: String },

    /// Decoding failed after the stream was opened
    #[error("Decode error: {0}")]
    Decode(String),

    /// Output device could not be opened or written
    #[error("Output error: {0}")]
    Output(String),

    /// Decode thread could not be spawned
    #[error("Failed to start decode task: {0}")]
    TaskSpawn(#[from] std::io::Error),

    /// Decode thread panicked
    #[error("Decode task panicked")]
    TaskPanicked,
}

impl PlaybackError {
    pub fn unavailable(path: impl AsRef<Path>, reason: impl ToString) -> Self {
        Self::ResourceUnavailable {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Reclassify a decoder failure as an unreadable resource at `path`
    ///
    /// Output and thread failures keep their own kind.
    pub(crate) fn for_resource(self, path: &Path) -> Self {
        match self {
            Self::Decode(reason) => Self::unavailable(path, reason),
            other => other,
        }
    }
}

impl From<PlaybackError> for cadenza_core::CadenzaError {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::ResourceUnavailable { .. } => Self::ResourceUnavailable(err.to_string()),
            other => Self::Playback(other.to_string()),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

#[cfg(test)]
mod tests {
    use super::*;
    use cadenza_core::CadenzaError;

    #[test]
    fn decode_failure_becomes_unavailable() {
        let err = PlaybackError::Decode("bad header".into()).for_resource(Path::new("a.mp3"));

        match err {
            PlaybackError::ResourceUnavailable { path, reason } => {
                assert_eq!(path, PathBuf::from("a.mp3"));
                assert_eq!(reason, "bad header");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn output_failure_keeps_its_kind() {
        let err = PlaybackError::Output("no device".into()).for_resource(Path::new("a.mp3"));
        assert!(matches!(err, PlaybackError::Output(_)));
    }

    #[test]
    fn converts_into_core_error() {
        let err: CadenzaError = PlaybackError::unavailable("missing.mp3", "not found").into();
        assert!(matches!(err, CadenzaError::ResourceUnavailable(_)));

        let err: CadenzaError = PlaybackError::TaskPanicked.into();
        assert!(matches!(err, CadenzaError::Playback(_)));
    }
}
