/// Playlist domain types
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::require_text;
use super::UserId;
use crate::error::Result;

pub type PlaylistId = i64;

/// Playlist
///
/// `owner_id` is fixed at creation; no update path touches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Owner user ID
    pub owner_id: UserId,

    /// Playlist name
    pub name: String,

    /// Creation date
    pub created_date: NaiveDate,
}

impl Playlist {
    /// Whether `user_id` may rename, delete or edit this playlist
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// Data for creating a new playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylist {
    pub owner_id: UserId,
    pub name: String,
    pub created_date: NaiveDate,
}

impl CreatePlaylist {
    /// Create a playlist dated today (UTC)
    pub fn new(owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            name: name.into(),
            created_date: Utc::now().date_naive(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)
    }
}

/// Partial update of a playlist (the owner is deliberately absent)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlaylist {
    pub name: Option<String>,
}

impl UpdatePlaylist {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) => require_text("name", name),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_creation_is_dated_today() {
        let playlist = CreatePlaylist::new(7, "Favorites");

        assert_eq!(playlist.owner_id, 7);
        assert_eq!(playlist.name, "Favorites");
        assert_eq!(playlist.created_date, Utc::now().date_naive());
    }

    #[test]
    fn ownership_check() {
        let playlist = Playlist {
            id: 1,
            owner_id: 7,
            name: "Favorites".to_string(),
            created_date: Utc::now().date_naive(),
        };

        assert!(playlist.is_owned_by(7));
        assert!(!playlist.is_owned_by(8));
    }

    #[test]
    fn blank_rename_is_rejected() {
        assert!(UpdatePlaylist::rename("  ").validate().is_err());
        assert!(UpdatePlaylist::rename("Road trip").validate().is_ok());
    }
}
