mod artist;
mod playlist;
mod song;
mod user;

pub use artist::{Artist, ArtistId, CreateArtist, UpdateArtist};
pub use playlist::{CreatePlaylist, Playlist, PlaylistId, UpdatePlaylist};
pub use song::{CreateSong, Song, SongId, UpdateSong};
pub use user::{CreateUser, UpdateUser, User, UserId};

use crate::error::{CadenzaError, Result};

/// Reject blank required text fields
pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CadenzaError::invalid_input(format!("{field} must not be empty")));
    }
    Ok(())
}
