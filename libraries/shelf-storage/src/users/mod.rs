//! User account and credential queries

use shelf_core::{error::Result, types::*, ShelfError};
use sqlx::{Row, SqlitePool};

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        username: row.get("username"),
        name: row.get("name"),
        surname: row.get("surname"),
        email: row.get("email"),
        national_id: row.get("national_id"),
        created_at: row.get("created_at"),
    }
}

/// Create an account
///
/// `password_hash` must already be hashed by the caller; raw credentials
/// never reach this layer. A clash on username, email or national id
/// surfaces as a duplicate rejection.
pub async fn create(pool: &SqlitePool, user: NewUser, password_hash: &str) -> Result<User> {
    let result = sqlx::query(
        "INSERT INTO users (username, password_hash, name, surname, email, national_id)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&user.username)
    .bind(password_hash)
    .bind(&user.name)
    .bind(&user.surname)
    .bind(&user.email)
    .bind(&user.national_id)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {}
        Err(e) if e.as_database_error().is_some_and(|db| db.is_unique_violation()) => {
            return Err(ShelfError::duplicate(format!(
                "an account with this username, email or national id already exists: {}",
                user.username
            )));
        }
        Err(e) => return Err(e.into()),
    }

    find_by_username(pool, &user.username)
        .await?
        .ok_or_else(|| ShelfError::storage("failed to read back created user"))
}

/// Look up an account by username
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT username, name, surname, email, national_id, created_at
         FROM users
         WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| user_from_row(&row)))
}

/// Get a user's password hash for authentication
///
/// Returns `None` when no such account exists; callers should treat that
/// the same as a failed comparison.
pub async fn get_password_hash(pool: &SqlitePool, username: &str) -> Result<Option<String>> {
    let hash = sqlx::query_scalar::<_, String>(
        "SELECT password_hash FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(hash)
}

/// Replace a user's password hash
pub async fn set_password_hash(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<()> {
    let result = sqlx::query("UPDATE users SET password_hash = ? WHERE username = ?")
        .bind(password_hash)
        .bind(username)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::not_found("User", username));
    }

    Ok(())
}

/// All accounts, username-ordered
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(
        "SELECT username, name, surname, email, national_id, created_at
         FROM users
         ORDER BY username",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(user_from_row).collect())
}
