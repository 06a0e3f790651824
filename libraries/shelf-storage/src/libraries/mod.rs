//! Library association queries
//!
//! A library is a named, user-owned collection of book references. Names
//! are unique per owner; membership is a set. Name uniqueness is enforced
//! by the store's `UNIQUE(owner_id, name)` constraint, so creation and
//! get-or-create are atomic under concurrent callers rather than
//! check-then-act.

use shelf_core::{error::Result, types::*, ShelfError};
use sqlx::{Row, SqliteConnection, SqliteExecutor, SqlitePool};

/// Create a library for a user
///
/// Rejects an empty name and a name the user already uses. The duplicate
/// check is the insert itself: a conflicting concurrent create loses on
/// the uniqueness constraint and reports `Duplicate`, never a second row.
pub async fn create(pool: &SqlitePool, owner_id: &str, name: &str) -> Result<Library> {
    if name.trim().is_empty() {
        return Err(ShelfError::invalid_input("library name must not be empty"));
    }

    let result = sqlx::query(
        "INSERT INTO libraries (owner_id, name)
         VALUES (?, ?)
         ON CONFLICT(owner_id, name) DO NOTHING",
    )
    .bind(owner_id)
    .bind(name)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::duplicate(format!(
            "library '{}' already exists for user {}",
            name, owner_id
        )));
    }

    let row = sqlx::query(
        "SELECT id, owner_id, name, created_at
         FROM libraries
         WHERE id = ?",
    )
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await?;

    Ok(Library {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
        books: None,
    })
}

/// Get a library by its owner-scoped name
pub async fn get_by_name(
    pool: &SqlitePool,
    owner_id: &str,
    name: &str,
) -> Result<Option<Library>> {
    let row = sqlx::query(
        "SELECT id, owner_id, name, created_at
         FROM libraries
         WHERE owner_id = ? AND name = ?",
    )
    .bind(owner_id)
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Library {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
        books: None,
    }))
}

/// Resolve a library's id from its owner-scoped name
///
/// `None` means not found; infrastructure faults propagate as errors.
pub async fn resolve_id<'e>(
    executor: impl SqliteExecutor<'e>,
    owner_id: &str,
    name: &str,
) -> Result<Option<LibraryId>> {
    let id = sqlx::query_scalar::<_, LibraryId>(
        "SELECT id FROM libraries WHERE owner_id = ? AND name = ?",
    )
    .bind(owner_id)
    .bind(name)
    .fetch_optional(executor)
    .await?;

    Ok(id)
}

/// Resolve a library's id, inserting the library if it does not exist
///
/// Runs on a caller-supplied connection so a surrounding transaction can
/// make the whole sequence atomic. A concurrent insert of the same
/// (owner, name) is absorbed by the uniqueness constraint; whichever row
/// exists afterwards is the one returned.
pub async fn get_or_create(
    conn: &mut SqliteConnection,
    owner_id: &str,
    name: &str,
) -> Result<LibraryId> {
    if name.trim().is_empty() {
        return Err(ShelfError::invalid_input("library name must not be empty"));
    }

    sqlx::query(
        "INSERT INTO libraries (owner_id, name)
         VALUES (?, ?)
         ON CONFLICT(owner_id, name) DO NOTHING",
    )
    .bind(owner_id)
    .bind(name)
    .execute(&mut *conn)
    .await?;

    let id = sqlx::query_scalar::<_, LibraryId>(
        "SELECT id FROM libraries WHERE owner_id = ? AND name = ?",
    )
    .bind(owner_id)
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;

    Ok(id)
}

/// Whether the user already has a library with this name
pub async fn name_exists<'e>(
    executor: impl SqliteExecutor<'e>,
    owner_id: &str,
    name: &str,
) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM libraries WHERE owner_id = ? AND name = ?",
    )
    .bind(owner_id)
    .bind(name)
    .fetch_one(executor)
    .await?;

    Ok(count > 0)
}

/// Whether a book is a member of a library
pub async fn contains_book<'e>(
    executor: impl SqliteExecutor<'e>,
    library_id: LibraryId,
    book_id: BookId,
) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM library_books WHERE library_id = ? AND book_id = ?",
    )
    .bind(library_id)
    .bind(book_id)
    .fetch_one(executor)
    .await?;

    Ok(count > 0)
}

/// Add a book to a library
///
/// Idempotent: adding a book that is already a member succeeds without
/// modifying anything.
pub async fn add_book(
    pool: &SqlitePool,
    owner_id: &str,
    library_name: &str,
    book_id: BookId,
) -> Result<()> {
    let library_id = resolve_id(pool, owner_id, library_name)
        .await?
        .ok_or_else(|| ShelfError::not_found("Library", library_name))?;

    let book_exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books WHERE id = ?")
            .bind(book_id)
            .fetch_one(pool)
            .await?;
    if book_exists == 0 {
        return Err(ShelfError::not_found("Book", book_id));
    }

    sqlx::query(
        "INSERT INTO library_books (library_id, book_id)
         VALUES (?, ?)
         ON CONFLICT(library_id, book_id) DO NOTHING",
    )
    .bind(library_id)
    .bind(book_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove a book from a library
///
/// Unlike `add_book` this is not idempotent: removing a book that is not
/// a member is a not-found rejection.
pub async fn remove_book(
    pool: &SqlitePool,
    owner_id: &str,
    library_name: &str,
    book_id: BookId,
) -> Result<()> {
    let library_id = resolve_id(pool, owner_id, library_name)
        .await?
        .ok_or_else(|| ShelfError::not_found("Library", library_name))?;

    let result = sqlx::query("DELETE FROM library_books WHERE library_id = ? AND book_id = ?")
        .bind(library_id)
        .bind(book_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::not_found("Book in library", book_id));
    }

    Ok(())
}

/// Delete a library
///
/// Memberships, recommendations and ratings scoped to the library are
/// removed by the store's cascade rules.
pub async fn delete(pool: &SqlitePool, owner_id: &str, name: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM libraries WHERE owner_id = ? AND name = ?")
        .bind(owner_id)
        .bind(name)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::not_found("Library", name));
    }

    Ok(())
}

/// Rename a library
pub async fn rename(
    pool: &SqlitePool,
    owner_id: &str,
    old_name: &str,
    new_name: &str,
) -> Result<()> {
    if new_name.trim().is_empty() {
        return Err(ShelfError::invalid_input("library name must not be empty"));
    }

    if name_exists(pool, owner_id, new_name).await? {
        return Err(ShelfError::duplicate(format!(
            "library '{}' already exists for user {}",
            new_name, owner_id
        )));
    }

    let result = sqlx::query("UPDATE libraries SET name = ? WHERE owner_id = ? AND name = ?")
        .bind(new_name)
        .bind(owner_id)
        .bind(old_name)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::not_found("Library", old_name));
    }

    Ok(())
}

/// List a user's library names, name-ordered
pub async fn list_names(pool: &SqlitePool, owner_id: &str) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT name FROM libraries WHERE owner_id = ? ORDER BY name",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(names)
}

/// List the books in a library, in insertion order
pub async fn get_books(
    pool: &SqlitePool,
    owner_id: &str,
    library_name: &str,
) -> Result<Vec<LibraryBook>> {
    let library_id = resolve_id(pool, owner_id, library_name)
        .await?
        .ok_or_else(|| ShelfError::not_found("Library", library_name))?;

    let rows = sqlx::query(
        "SELECT lb.book_id, lb.added_at, b.title, b.author
         FROM library_books lb
         INNER JOIN books b ON lb.book_id = b.id
         WHERE lb.library_id = ?
         ORDER BY lb.id",
    )
    .bind(library_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| LibraryBook {
            book_id: row.get("book_id"),
            added_at: row.get("added_at"),
            title: Some(row.get("title")),
            author: Some(row.get("author")),
        })
        .collect())
}
