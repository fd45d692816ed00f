//! Store contract for the music catalog

use crate::error::Result;
use crate::types::{
    Artist, ArtistId, CreateArtist, CreatePlaylist, CreateSong, CreateUser, Playlist, PlaylistId,
    Song, SongId, UpdateArtist, UpdatePlaylist, UpdateSong, UpdateUser, User, UserId,
};
use async_trait::async_trait;

/// Persistent catalog of users, artists, songs and playlists
///
/// Every method is one atomic unit against the backing store. Lookups by id
/// fail with `CadenzaError::NotFound` rather than returning `None`, and every
/// mutation is visible to the next read (implementations keep no client-side
/// cache).
///
/// Deletes carry their cascades:
/// - deleting a song removes it from every playlist
/// - deleting a playlist removes its memberships, never the songs
/// - deleting a user removes the playlists they own (and those memberships)
#[async_trait]
pub trait LibraryStore: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Register a user; `Duplicate` if the email is taken
    async fn create_user(&self, user: CreateUser) -> Result<UserId>;

    async fn get_user(&self, id: UserId) -> Result<User>;

    async fn list_users(&self) -> Result<Vec<User>>;

    /// Apply a partial update; `Duplicate` if the new email is taken
    async fn update_user(&self, id: UserId, changes: UpdateUser) -> Result<()>;

    async fn delete_user(&self, id: UserId) -> Result<()>;

    /// Look up a user by credentials (plaintext comparison)
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>>;

    // ========================================================================
    // Artists
    // ========================================================================

    async fn create_artist(&self, artist: CreateArtist) -> Result<ArtistId>;

    async fn get_artist(&self, id: ArtistId) -> Result<Artist>;

    async fn list_artists(&self) -> Result<Vec<Artist>>;

    async fn update_artist(&self, id: ArtistId, changes: UpdateArtist) -> Result<()>;

    async fn delete_artist(&self, id: ArtistId) -> Result<()>;

    // ========================================================================
    // Songs
    // ========================================================================

    async fn create_song(&self, song: CreateSong) -> Result<SongId>;

    async fn get_song(&self, id: SongId) -> Result<Song>;

    async fn list_songs(&self) -> Result<Vec<Song>>;

    async fn update_song(&self, id: SongId, changes: UpdateSong) -> Result<()>;

    async fn delete_song(&self, id: SongId) -> Result<()>;

    /// Songs credited to an artist name
    async fn list_songs_by_artist(&self, artist_name: &str) -> Result<Vec<Song>>;

    /// Songs whose title matches exactly
    async fn find_songs_by_title(&self, title: &str) -> Result<Vec<Song>>;

    // ========================================================================
    // Playlists
    // ========================================================================

    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<PlaylistId>;

    async fn get_playlist(&self, id: PlaylistId) -> Result<Playlist>;

    async fn list_playlists(&self) -> Result<Vec<Playlist>>;

    async fn list_playlists_for_owner(&self, owner_id: UserId) -> Result<Vec<Playlist>>;

    async fn update_playlist(&self, id: PlaylistId, changes: UpdatePlaylist) -> Result<()>;

    async fn delete_playlist(&self, id: PlaylistId) -> Result<()>;

    // ========================================================================
    // Playlist membership
    // ========================================================================

    /// Append a song; re-adding a present song is a no-op
    async fn add_song_to_playlist(&self, playlist_id: PlaylistId, song_id: SongId) -> Result<()>;

    /// Remove a song; absent songs are a no-op
    async fn remove_song_from_playlist(
        &self,
        playlist_id: PlaylistId,
        song_id: SongId,
    ) -> Result<()>;

    /// Songs of a playlist in insertion order
    async fn list_playlist_songs(&self, playlist_id: PlaylistId) -> Result<Vec<Song>>;

    async fn count_playlist_songs(&self, playlist_id: PlaylistId) -> Result<u64>;
}
