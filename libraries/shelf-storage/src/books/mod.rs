//! Catalog lookup queries
//!
//! Read-only search over the book catalog. A search that matches nothing
//! returns an empty set, never an error.

use shelf_core::{error::Result, types::*};
use sqlx::{Row, SqlitePool};

fn book_from_row(row: &sqlx::sqlite::SqliteRow) -> Book {
    Book {
        id: row.get("id"),
        title: row.get("title"),
        author: row.get("author"),
        year: row.get("year"),
        publisher: row.get("publisher"),
        isbn: row.get("isbn"),
    }
}

/// Get a book by exact id
pub async fn get_by_id(pool: &SqlitePool, id: BookId) -> Result<Option<Book>> {
    let row = sqlx::query(
        "SELECT id, title, author, year, publisher, isbn
         FROM books
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| book_from_row(&row)))
}

/// Search by partial title, case-insensitive, ordered by title
pub async fn search_by_title(pool: &SqlitePool, title: &str) -> Result<Vec<Book>> {
    let pattern = format!("%{}%", title);

    let rows = sqlx::query(
        "SELECT id, title, author, year, publisher, isbn
         FROM books
         WHERE title LIKE ?
         ORDER BY title",
    )
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(book_from_row).collect())
}

/// Search by partial author name, case-insensitive, ordered by title
pub async fn search_by_author(pool: &SqlitePool, author: &str) -> Result<Vec<Book>> {
    let pattern = format!("%{}%", author);

    let rows = sqlx::query(
        "SELECT id, title, author, year, publisher, isbn
         FROM books
         WHERE author LIKE ?
         ORDER BY title",
    )
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(book_from_row).collect())
}

/// Search by partial author name and exact publication year
pub async fn search_by_author_and_year(
    pool: &SqlitePool,
    author: &str,
    year: i64,
) -> Result<Vec<Book>> {
    let pattern = format!("%{}%", author);

    let rows = sqlx::query(
        "SELECT id, title, author, year, publisher, isbn
         FROM books
         WHERE author LIKE ? AND year = ?
         ORDER BY title",
    )
    .bind(&pattern)
    .bind(year)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(book_from_row).collect())
}

/// Insert a catalog entry
///
/// The catalog is read-only for users; this is used by the import tooling
/// and test fixtures.
pub async fn insert(pool: &SqlitePool, book: NewBook) -> Result<Book> {
    let result = sqlx::query(
        "INSERT INTO books (title, author, year, publisher, isbn)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&book.title)
    .bind(&book.author)
    .bind(book.year)
    .bind(&book.publisher)
    .bind(&book.isbn)
    .execute(pool)
    .await?;

    Ok(Book {
        id: result.last_insert_rowid(),
        title: book.title,
        author: book.author,
        year: book.year,
        publisher: book.publisher,
        isbn: book.isbn,
    })
}
