//! Test helpers and fixtures for storage integration tests
//!
//! Databases are real SQLite files in a temporary directory, so migrations,
//! constraints and foreign keys behave exactly as in production.

#![allow(dead_code)]

use cadenza_core::types::*;
use cadenza_storage::SqliteLibraryStore;
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = cadenza_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        cadenza_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// A `LibraryStore` over this database
    pub fn store(&self) -> Arc<SqliteLibraryStore> {
        Arc::new(SqliteLibraryStore::new(self.pool.clone()))
    }
}

/// Test fixture: Create a test user
pub async fn create_test_user(pool: &SqlitePool, email: &str) -> UserId {
    cadenza_storage::users::create(pool, CreateUser::new("Test User", email, "secret"))
        .await
        .expect("Failed to create test user")
}

/// Test fixture: Create a test artist
pub async fn create_test_artist(pool: &SqlitePool, name: &str) -> ArtistId {
    cadenza_storage::artists::create(pool, CreateArtist::new(name))
        .await
        .expect("Failed to create test artist")
}

/// Test fixture: Create a test song
pub async fn create_test_song(pool: &SqlitePool, title: &str, artist: &str) -> SongId {
    let mut song = CreateSong::new(title, artist, format!("/music/{title}.mp3"));
    song.duration_seconds = 180;

    cadenza_storage::songs::create(pool, song)
        .await
        .expect("Failed to create test song")
}

/// Test fixture: Create a test playlist
pub async fn create_test_playlist(pool: &SqlitePool, name: &str, owner_id: UserId) -> PlaylistId {
    cadenza_storage::playlists::create(pool, CreatePlaylist::new(owner_id, name))
        .await
        .expect("Failed to create test playlist")
}

/// Ids of the songs in a playlist, in listed order
pub async fn playlist_song_ids(pool: &SqlitePool, playlist_id: PlaylistId) -> Vec<SongId> {
    cadenza_storage::playlists::list_songs(pool, playlist_id)
        .await
        .expect("Failed to list playlist songs")
        .into_iter()
        .map(|song| song.id)
        .collect()
}
