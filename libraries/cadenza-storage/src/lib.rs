//! Cadenza Storage
//!
//! `SQLite` catalog store for Cadenza: users, artists, songs, playlists and
//! the playlist/song association, plus the playlist service built on top.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each entity module owns its own queries
//! - **Atomic Calls**: every public operation is one statement or one transaction
//! - **Cascades in the Store**: deletes remove dependent rows themselves
//! - **Bound Parameters Only**: no user value is ever spliced into SQL text
//!
//! # Example
//!
//! ```rust,no_run
//! use cadenza_storage::{create_pool, run_migrations, SqliteLibraryStore, PlaylistService};
//! use cadenza_core::{CreateUser, LibraryStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://cadenza.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = Arc::new(SqliteLibraryStore::new(pool));
//! let user_id = store.create_user(CreateUser::new("Ada", "ada@example.com", "pw")).await?;
//!
//! let playlists = PlaylistService::new(store);
//! let favorites = playlists.create_playlist(user_id, "Favorites").await?;
//! let songs = playlists.list_songs(favorites).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod playlist_service;

// Vertical slices
pub mod artists;
pub mod playlists;
pub mod songs;
pub mod users;

pub use context::SqliteLibraryStore;
pub use error::StorageError;
pub use playlist_service::PlaylistService;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connection pool tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Maximum pooled connections
    pub max_connections: u32,

    /// How long a writer waits for the database lock
    pub busy_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            busy_timeout: Duration::from_secs(30),
        }
    }
}

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool with default options
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://cadenza.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    create_pool_with(database_url, StoreOptions::default()).await
}

/// Create a new `SQLite` pool
pub async fn create_pool_with(
    database_url: &str,
    options: StoreOptions,
) -> Result<SqlitePool, StorageError> {
    tracing::debug!(database_url, ?options, "creating sqlite pool");

    let connect = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal) // Use WAL mode for better concurrency
        .busy_timeout(options.busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(options.max_connections)
        .connect_with(connect)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::info!(database_url, "sqlite pool ready");

    Ok(pool)
}
