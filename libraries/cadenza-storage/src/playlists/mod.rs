//! Playlist queries and playlist/song membership

use cadenza_core::{error::Result, types::*, CadenzaError};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::songs::song_from_row;

fn playlist_from_row(row: &SqliteRow) -> Result<Playlist> {
    Ok(Playlist {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        name: row.try_get("name")?,
        created_date: row.try_get("created_date")?,
    })
}

async fn ensure_exists(
    pool: &SqlitePool,
    sql: &'static str,
    entity: &'static str,
    id: i64,
) -> Result<()> {
    let found = sqlx::query(sql).bind(id).fetch_optional(pool).await?;

    match found {
        Some(_) => Ok(()),
        None => Err(CadenzaError::not_found(entity, id)),
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

/// Get all playlists
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        r#"
        SELECT id, owner_id, name, created_date
        FROM playlists
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(playlist_from_row).collect()
}

/// Get playlists owned by a user
pub async fn get_for_owner(pool: &SqlitePool, owner_id: UserId) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        r#"
        SELECT id, owner_id, name, created_date
        FROM playlists
        WHERE owner_id = ?
        ORDER BY id
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(playlist_from_row).collect()
}

/// Get playlist by ID
pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Playlist> {
    let row = sqlx::query(
        r#"
        SELECT id, owner_id, name, created_date
        FROM playlists
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| CadenzaError::not_found("Playlist", id))?;

    playlist_from_row(&row)
}

/// Create a new playlist
///
/// Fails with `NotFound` if the owner does not exist.
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<PlaylistId> {
    playlist.validate()?;

    // One statement, so the write lock is taken up front and waits out
    // concurrent writers; a missing owner shows up as a foreign-key failure
    let result = sqlx::query(
        r#"
        INSERT INTO playlists (owner_id, name, created_date)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(playlist.owner_id)
    .bind(&playlist.name)
    .bind(playlist.created_date)
    .execute(pool)
    .await;

    let result = match result {
        Ok(result) => result,
        Err(err) if is_foreign_key_violation(&err) => {
            ensure_exists(
                pool,
                "SELECT 1 FROM users WHERE id = ?",
                "User",
                playlist.owner_id,
            )
            .await?;
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    let id = result.last_insert_rowid();
    tracing::debug!(playlist_id = id, owner_id = playlist.owner_id, "playlist created");

    Ok(id)
}

/// Apply a partial update (name only; the owner never changes)
pub async fn update(pool: &SqlitePool, id: PlaylistId, changes: UpdatePlaylist) -> Result<()> {
    changes.validate()?;

    let Some(name) = changes.name else {
        get_by_id(pool, id).await?;
        return Ok(());
    };

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE playlists SET ");
    builder.push("name = ").push_bind(name);
    builder.push(" WHERE id = ").push_bind(id);

    let result = builder.build().execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(CadenzaError::not_found("Playlist", id));
    }

    Ok(())
}

/// Delete a playlist and its memberships; songs stay in the catalog
pub async fn delete(pool: &SqlitePool, id: PlaylistId) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CadenzaError::not_found("Playlist", id));
    }

    tx.commit().await?;
    Ok(())
}

/// Append a song to the end of a playlist
///
/// Re-adding a song that is already present leaves the playlist untouched.
pub async fn add_song(pool: &SqlitePool, playlist_id: PlaylistId, song_id: SongId) -> Result<()> {
    // Position and insert in one statement: concurrent adds serialize on
    // the write lock instead of failing a read-to-write upgrade
    let result = sqlx::query(
        r#"
        INSERT INTO playlist_songs (playlist_id, song_id, position)
        SELECT ?, ?, COALESCE(MAX(position), -1) + 1
        FROM playlist_songs
        WHERE playlist_id = ?
        ON CONFLICT(playlist_id, song_id) DO NOTHING
        "#,
    )
    .bind(playlist_id)
    .bind(song_id)
    .bind(playlist_id)
    .execute(pool)
    .await;

    let result = match result {
        Ok(result) => result,
        Err(err) if is_foreign_key_violation(&err) => {
            ensure_exists(
                pool,
                "SELECT 1 FROM playlists WHERE id = ?",
                "Playlist",
                playlist_id,
            )
            .await?;
            ensure_exists(pool, "SELECT 1 FROM songs WHERE id = ?", "Song", song_id).await?;
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    if result.rows_affected() == 0 {
        tracing::trace!(playlist_id, song_id, "song already in playlist");
    }

    Ok(())
}

/// Remove a song from a playlist; removing an absent song is not an error
pub async fn remove_song(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    song_id: SongId,
) -> Result<()> {
    sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id)
        .bind(song_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Get the songs of a playlist in insertion order
pub async fn list_songs(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<Vec<Song>> {
    get_by_id(pool, playlist_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT s.id, s.title, s.artist_name, s.genre, s.duration_seconds, s.release_date,
               s.image_path, s.audio_path
        FROM playlist_songs ps
        INNER JOIN songs s ON ps.song_id = s.id
        WHERE ps.playlist_id = ?
        ORDER BY ps.position, ps.rowid
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(song_from_row).collect()
}

/// Number of songs in a playlist
pub async fn count_songs(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<u64> {
    get_by_id(pool, playlist_id).await?;

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM playlist_songs WHERE playlist_id = ?")
            .bind(playlist_id)
            .fetch_one(pool)
            .await?;

    Ok(u64::try_from(count).unwrap_or_default())
}
