//! User management and credential queries

use cadenza_core::{error::Result, types::*, CadenzaError};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

fn user_from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        date_of_birth: row.try_get("date_of_birth")?,
        country: row.try_get("country")?,
    })
}

/// Turn a unique violation on `users.email` into a readable duplicate error
fn email_conflict(err: sqlx::Error, email: &str) -> CadenzaError {
    match CadenzaError::from(err) {
        CadenzaError::Duplicate(_) => {
            CadenzaError::duplicate(format!("email already registered: {email}"))
        }
        other => other,
    }
}

/// Register a new user
///
/// Fails with `Duplicate` if the email is already registered (case-insensitive).
#[tracing::instrument(skip(pool, user), fields(email = %user.email))]
pub async fn create(pool: &SqlitePool, user: CreateUser) -> Result<UserId> {
    user.validate()?;

    let result = sqlx::query(
        "INSERT INTO users (full_name, email, password, date_of_birth, country)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&user.full_name)
    .bind(&user.email)
    .bind(&user.password)
    .bind(user.date_of_birth)
    .bind(&user.country)
    .execute(pool)
    .await
    .map_err(|e| email_conflict(e, &user.email))?;

    let id = result.last_insert_rowid();
    tracing::debug!(user_id = id, "user created");

    Ok(id)
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<User> {
    let row = sqlx::query(
        "SELECT id, full_name, email, password, date_of_birth, country
         FROM users
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| CadenzaError::not_found("User", id))?;

    user_from_row(&row)
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(
        "SELECT id, full_name, email, password, date_of_birth, country
         FROM users
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(user_from_row).collect()
}

/// Find the user matching an email/password pair
///
/// Passwords are compared as stored; there is no hashing.
#[tracing::instrument(skip(pool, password))]
pub async fn authenticate(pool: &SqlitePool, email: &str, password: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, full_name, email, password, date_of_birth, country
         FROM users
         WHERE email = ? AND password = ?",
    )
    .bind(email)
    .bind(password)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Apply a partial update
pub async fn update(pool: &SqlitePool, id: UserId, changes: UpdateUser) -> Result<()> {
    changes.validate()?;

    if changes.is_empty() {
        // Nothing to write, but a missing id is still an error
        get_by_id(pool, id).await?;
        return Ok(());
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE users SET ");
    {
        let mut fields = builder.separated(", ");
        if let Some(full_name) = changes.full_name.clone() {
            fields.push("full_name = ").push_bind_unseparated(full_name);
        }
        if let Some(email) = changes.email.clone() {
            fields.push("email = ").push_bind_unseparated(email);
        }
        if let Some(password) = changes.password.clone() {
            fields.push("password = ").push_bind_unseparated(password);
        }
        if let Some(date_of_birth) = changes.date_of_birth {
            fields
                .push("date_of_birth = ")
                .push_bind_unseparated(date_of_birth);
        }
        if let Some(country) = changes.country.clone() {
            fields.push("country = ").push_bind_unseparated(country);
        }
    }
    builder.push(" WHERE id = ").push_bind(id);

    let result = builder.build().execute(pool).await.map_err(|e| {
        email_conflict(e, changes.email.as_deref().unwrap_or_default())
    })?;

    if result.rows_affected() == 0 {
        return Err(CadenzaError::not_found("User", id));
    }

    Ok(())
}

/// Delete a user together with the playlists they own
pub async fn delete(pool: &SqlitePool, id: UserId) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "DELETE FROM playlist_songs
         WHERE playlist_id IN (SELECT id FROM playlists WHERE owner_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    let playlists = sqlx::query("DELETE FROM playlists WHERE owner_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        // Dropping the transaction rolls it back
        return Err(CadenzaError::not_found("User", id));
    }

    tx.commit().await?;

    tracing::debug!(
        user_id = id,
        playlists_removed = playlists.rows_affected(),
        "user deleted"
    );

    Ok(())
}
