//! Song types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::require_text;
use crate::error::Result;

pub type SongId = i64;

/// A song in the catalog
///
/// `audio_path` and `image_path` are opaque locators; resolving them to bytes
/// is left to whoever plays or renders the song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist_name: String,
    pub genre: Option<String>,
    pub duration_seconds: u32,
    pub release_date: Option<NaiveDate>,
    pub image_path: Option<String>,
    pub audio_path: String,
}

impl Song {
    /// Get the song duration as a Duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_seconds))
    }
}

/// Data for creating a new song
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSong {
    pub title: String,
    pub artist_name: String,
    pub genre: Option<String>,
    pub duration_seconds: u32,
    pub release_date: Option<NaiveDate>,
    pub image_path: Option<String>,
    pub audio_path: String,
}

impl CreateSong {
    pub fn new(
        title: impl Into<String>,
        artist_name: impl Into<String>,
        audio_path: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist_name: artist_name.into(),
            genre: None,
            duration_seconds: 0,
            release_date: None,
            image_path: None,
            audio_path: audio_path.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("artist_name", &self.artist_name)?;
        require_text("audio_path", &self.audio_path)
    }
}

/// Partial update of a song
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSong {
    pub title: Option<String>,
    pub artist_name: Option<String>,
    pub genre: Option<String>,
    pub duration_seconds: Option<u32>,
    pub release_date: Option<NaiveDate>,
    pub image_path: Option<String>,
    pub audio_path: Option<String>,
}

impl UpdateSong {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist_name.is_none()
            && self.genre.is_none()
            && self.duration_seconds.is_none()
            && self.release_date.is_none()
            && self.image_path.is_none()
            && self.audio_path.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(artist) = &self.artist_name {
            require_text("artist_name", artist)?;
        }
        if let Some(path) = &self.audio_path {
            require_text("audio_path", path)?;
        }
        Ok(())
    }
}
