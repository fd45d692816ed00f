//! Song catalog queries

use cadenza_core::{error::Result, types::*, CadenzaError};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

pub(crate) fn song_from_row(row: &SqliteRow) -> Result<Song> {
    let duration: i64 = row.try_get("duration_seconds")?;
    let duration_seconds = u32::try_from(duration).map_err(|_| {
        CadenzaError::Database(format!("song has invalid duration_seconds: {duration}"))
    })?;

    Ok(Song {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        artist_name: row.try_get("artist_name")?,
        genre: row.try_get("genre")?,
        duration_seconds,
        release_date: row.try_get("release_date")?,
        image_path: row.try_get("image_path")?,
        audio_path: row.try_get("audio_path")?,
    })
}

/// Get all songs
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Song>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, artist_name, genre, duration_seconds, release_date,
               image_path, audio_path
        FROM songs
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(song_from_row).collect()
}

/// Get song by ID
pub async fn get_by_id(pool: &SqlitePool, id: SongId) -> Result<Song> {
    let row = sqlx::query(
        r#"
        SELECT id, title, artist_name, genre, duration_seconds, release_date,
               image_path, audio_path
        FROM songs
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| CadenzaError::not_found("Song", id))?;

    song_from_row(&row)
}

/// Get songs credited to an artist (case-insensitive name match)
pub async fn get_by_artist(pool: &SqlitePool, artist_name: &str) -> Result<Vec<Song>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, artist_name, genre, duration_seconds, release_date,
               image_path, audio_path
        FROM songs
        WHERE artist_name = ? COLLATE NOCASE
        ORDER BY title, id
        "#,
    )
    .bind(artist_name)
    .fetch_all(pool)
    .await?;

    rows.iter().map(song_from_row).collect()
}

/// Find songs by exact title
pub async fn find_by_title(pool: &SqlitePool, title: &str) -> Result<Vec<Song>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, artist_name, genre, duration_seconds, release_date,
               image_path, audio_path
        FROM songs
        WHERE title = ?
        ORDER BY id
        "#,
    )
    .bind(title)
    .fetch_all(pool)
    .await?;

    rows.iter().map(song_from_row).collect()
}

/// Create a new song
pub async fn create(pool: &SqlitePool, song: CreateSong) -> Result<SongId> {
    song.validate()?;

    let result = sqlx::query(
        r#"
        INSERT INTO songs (title, artist_name, genre, duration_seconds, release_date,
                           image_path, audio_path)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&song.title)
    .bind(&song.artist_name)
    .bind(&song.genre)
    .bind(i64::from(song.duration_seconds))
    .bind(song.release_date)
    .bind(&song.image_path)
    .bind(&song.audio_path)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(song_id = id, title = %song.title, "song created");

    Ok(id)
}

/// Apply a partial update
pub async fn update(pool: &SqlitePool, id: SongId, changes: UpdateSong) -> Result<()> {
    changes.validate()?;

    if changes.is_empty() {
        get_by_id(pool, id).await?;
        return Ok(());
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE songs SET ");
    {
        let mut fields = builder.separated(", ");
        if let Some(title) = changes.title {
            fields.push("title = ").push_bind_unseparated(title);
        }
        if let Some(artist_name) = changes.artist_name {
            fields.push("artist_name = ").push_bind_unseparated(artist_name);
        }
        if let Some(genre) = changes.genre {
            fields.push("genre = ").push_bind_unseparated(genre);
        }
        if let Some(duration) = changes.duration_seconds {
            fields
                .push("duration_seconds = ")
                .push_bind_unseparated(i64::from(duration));
        }
        if let Some(release_date) = changes.release_date {
            fields.push("release_date = ").push_bind_unseparated(release_date);
        }
        if let Some(image_path) = changes.image_path {
            fields.push("image_path = ").push_bind_unseparated(image_path);
        }
        if let Some(audio_path) = changes.audio_path {
            fields.push("audio_path = ").push_bind_unseparated(audio_path);
        }
    }
    builder.push(" WHERE id = ").push_bind(id);

    let result = builder.build().execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(CadenzaError::not_found("Song", id));
    }

    Ok(())
}

/// Delete a song and drop it from every playlist
pub async fn delete(pool: &SqlitePool, id: SongId) -> Result<()> {
    let mut tx = pool.begin().await?;

    let memberships = sqlx::query("DELETE FROM playlist_songs WHERE song_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CadenzaError::not_found("Song", id));
    }

    tx.commit().await?;

    tracing::debug!(
        song_id = id,
        playlist_entries_removed = memberships.rows_affected(),
        "song deleted"
    );

    Ok(())
}
