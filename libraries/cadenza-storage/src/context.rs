use async_trait::async_trait;
use cadenza_core::{error::Result, types::*, LibraryStore};
use sqlx::SqlitePool;

use crate::{artists, playlists, songs, users};

/// `SQLite` implementation of [`LibraryStore`]
///
/// Every call goes straight to the database; nothing is cached.
#[derive(Debug, Clone)]
pub struct SqliteLibraryStore {
    pool: SqlitePool,
}

impl SqliteLibraryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl LibraryStore for SqliteLibraryStore {
    async fn create_user(&self, user: CreateUser) -> Result<UserId> {
        users::create(&self.pool, user).await
    }

    async fn get_user(&self, id: UserId) -> Result<User> {
        users::get_by_id(&self.pool, id).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }

    async fn update_user(&self, id: UserId, changes: UpdateUser) -> Result<()> {
        users::update(&self.pool, id, changes).await
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        users::delete(&self.pool, id).await
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        users::authenticate(&self.pool, email, password).await
    }

    async fn create_artist(&self, artist: CreateArtist) -> Result<ArtistId> {
        artists::create(&self.pool, artist).await
    }

    async fn get_artist(&self, id: ArtistId) -> Result<Artist> {
        artists::get_by_id(&self.pool, id).await
    }

    async fn list_artists(&self) -> Result<Vec<Artist>> {
        artists::get_all(&self.pool).await
    }

    async fn update_artist(&self, id: ArtistId, changes: UpdateArtist) -> Result<()> {
        artists::update(&self.pool, id, changes).await
    }

    async fn delete_artist(&self, id: ArtistId) -> Result<()> {
        artists::delete(&self.pool, id).await
    }

    async fn create_song(&self, song: CreateSong) -> Result<SongId> {
        songs::create(&self.pool, song).await
    }

    async fn get_song(&self, id: SongId) -> Result<Song> {
        songs::get_by_id(&self.pool, id).await
    }

    async fn list_songs(&self) -> Result<Vec<Song>> {
        songs::get_all(&self.pool).await
    }

    async fn update_song(&self, id: SongId, changes: UpdateSong) -> Result<()> {
        songs::update(&self.pool, id, changes).await
    }

    async fn delete_song(&self, id: SongId) -> Result<()> {
        songs::delete(&self.pool, id).await
    }

    async fn list_songs_by_artist(&self, artist_name: &str) -> Result<Vec<Song>> {
        songs::get_by_artist(&self.pool, artist_name).await
    }

    async fn find_songs_by_title(&self, title: &str) -> Result<Vec<Song>> {
        songs::find_by_title(&self.pool, title).await
    }

    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<PlaylistId> {
        playlists::create(&self.pool, playlist).await
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Playlist> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        playlists::get_all(&self.pool).await
    }

    async fn list_playlists_for_owner(&self, owner_id: UserId) -> Result<Vec<Playlist>> {
        playlists::get_for_owner(&self.pool, owner_id).await
    }

    async fn update_playlist(&self, id: PlaylistId, changes: UpdatePlaylist) -> Result<()> {
        playlists::update(&self.pool, id, changes).await
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<()> {
        playlists::delete(&self.pool, id).await
    }

    async fn add_song_to_playlist(&self, playlist_id: PlaylistId, song_id: SongId) -> Result<()> {
        playlists::add_song(&self.pool, playlist_id, song_id).await
    }

    async fn remove_song_from_playlist(
        &self,
        playlist_id: PlaylistId,
        song_id: SongId,
    ) -> Result<()> {
        playlists::remove_song(&self.pool, playlist_id, song_id).await
    }

    async fn list_playlist_songs(&self, playlist_id: PlaylistId) -> Result<Vec<Song>> {
        playlists::list_songs(&self.pool, playlist_id).await
    }

    async fn count_playlist_songs(&self, playlist_id: PlaylistId) -> Result<u64> {
        playlists::count_songs(&self.pool, playlist_id).await
    }
}
