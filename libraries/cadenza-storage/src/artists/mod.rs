use cadenza_core::{error::Result, types::*, CadenzaError};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    Ok(Artist {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        country: row.try_get("country")?,
        image_path: row.try_get("image_path")?,
    })
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let rows = sqlx::query(
        "SELECT id, name, country, image_path
         FROM artists
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(artist_from_row).collect()
}

pub async fn get_by_id(pool: &SqlitePool, id: ArtistId) -> Result<Artist> {
    let row = sqlx::query(
        "SELECT id, name, country, image_path
         FROM artists
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| CadenzaError::not_found("Artist", id))?;

    artist_from_row(&row)
}

pub async fn create(pool: &SqlitePool, artist: CreateArtist) -> Result<ArtistId> {
    artist.validate()?;

    let result = sqlx::query(
        "INSERT INTO artists (name, country, image_path)
         VALUES (?, ?, ?)",
    )
    .bind(&artist.name)
    .bind(&artist.country)
    .bind(&artist.image_path)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, id: ArtistId, changes: UpdateArtist) -> Result<()> {
    changes.validate()?;

    if changes.is_empty() {
        get_by_id(pool, id).await?;
        return Ok(());
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE artists SET ");
    {
        let mut fields = builder.separated(", ");
        if let Some(name) = changes.name {
            fields.push("name = ").push_bind_unseparated(name);
        }
        if let Some(country) = changes.country {
            fields.push("country = ").push_bind_unseparated(country);
        }
        if let Some(image_path) = changes.image_path {
            fields.push("image_path = ").push_bind_unseparated(image_path);
        }
    }
    builder.push(" WHERE id = ").push_bind(id);

    let result = builder.build().execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(CadenzaError::not_found("Artist", id));
    }

    Ok(())
}

/// Delete an artist
///
/// Songs name their artist as text, so they are left in place.
pub async fn delete(pool: &SqlitePool, id: ArtistId) -> Result<()> {
    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CadenzaError::not_found("Artist", id));
    }

    Ok(())
}
