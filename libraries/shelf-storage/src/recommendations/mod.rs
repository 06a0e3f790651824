//! Recommendation queries
//!
//! Business rules live here, in front of the writes: a book never
//! recommends itself, a user recommends at most
//! `MAX_RECOMMENDATIONS_PER_READ_BOOK` distinct books per read book, and
//! the exact quadruple is unique. The count check and the insert share a
//! transaction, and the store's `UNIQUE` constraint turns any racing
//! duplicate into a clean rejection instead of a second row.

use shelf_core::{error::Result, types::*, ShelfError};
use sqlx::{Row, SqlitePool};

/// Record a recommendation
pub async fn add(pool: &SqlitePool, rec: NewRecommendation) -> Result<Recommendation> {
    if rec.recommended_book_id == rec.read_book_id {
        return Err(ShelfError::invalid_input(
            "a book cannot be recommended for itself",
        ));
    }

    let mut tx = pool.begin().await?;

    // Distinct books this user already recommends for the read book,
    // not counting the candidate itself.
    let distinct_given = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT recommended_book_id)
         FROM recommendations
         WHERE user_id = ? AND read_book_id = ? AND recommended_book_id <> ?",
    )
    .bind(&rec.user_id)
    .bind(rec.read_book_id)
    .bind(rec.recommended_book_id)
    .fetch_one(&mut *tx)
    .await?;

    if distinct_given >= MAX_RECOMMENDATIONS_PER_READ_BOOK {
        return Err(ShelfError::LimitExceeded(format!(
            "user {} already recommends {} books for book {}",
            rec.user_id, MAX_RECOMMENDATIONS_PER_READ_BOOK, rec.read_book_id
        )));
    }

    let result = sqlx::query(
        "INSERT INTO recommendations
             (user_id, library_id, read_book_id, recommended_book_id, comment)
         VALUES (?, ?, ?, ?, ?)
         ON CONFLICT(user_id, library_id, read_book_id, recommended_book_id) DO NOTHING",
    )
    .bind(&rec.user_id)
    .bind(rec.library_id)
    .bind(rec.read_book_id)
    .bind(rec.recommended_book_id)
    .bind(&rec.comment)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::duplicate(format!(
            "book {} is already recommended for book {} in library {}",
            rec.recommended_book_id, rec.read_book_id, rec.library_id
        )));
    }

    let created_at = sqlx::query_scalar::<_, String>(
        "SELECT created_at FROM recommendations WHERE id = ?",
    )
    .bind(result.last_insert_rowid())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Recommendation {
        user_id: rec.user_id,
        library_id: rec.library_id,
        read_book_id: rec.read_book_id,
        recommended_book_id: rec.recommended_book_id,
        comment: rec.comment,
        created_at,
    })
}

/// How many distinct books a user recommends for a read book
pub async fn count_given(pool: &SqlitePool, user_id: &str, read_book_id: BookId) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT recommended_book_id)
         FROM recommendations
         WHERE user_id = ? AND read_book_id = ?",
    )
    .bind(user_id)
    .bind(read_book_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Distinct books recommended for a read book within one library
pub async fn find_recommended(
    pool: &SqlitePool,
    library_id: LibraryId,
    read_book_id: BookId,
) -> Result<Vec<Book>> {
    let rows = sqlx::query(
        "SELECT DISTINCT b.id, b.title, b.author, b.year, b.publisher, b.isbn
         FROM recommendations r
         INNER JOIN books b ON r.recommended_book_id = b.id
         WHERE r.library_id = ? AND r.read_book_id = ?
         ORDER BY b.title",
    )
    .bind(library_id)
    .bind(read_book_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Book {
            id: row.get("id"),
            title: row.get("title"),
            author: row.get("author"),
            year: row.get("year"),
            publisher: row.get("publisher"),
            isbn: row.get("isbn"),
        })
        .collect())
}

/// Recommended books for a (library, read book) pair, with how often each
/// has been suggested, most-suggested first
pub async fn find_recommended_with_count(
    pool: &SqlitePool,
    library_id: LibraryId,
    read_book_id: BookId,
) -> Result<Vec<RecommendedBook>> {
    let rows = sqlx::query(
        "SELECT r.recommended_book_id, b.title, b.author,
                COUNT(*) AS times_recommended
         FROM recommendations r
         INNER JOIN books b ON r.recommended_book_id = b.id
         WHERE r.library_id = ? AND r.read_book_id = ?
         GROUP BY r.recommended_book_id
         ORDER BY times_recommended DESC, b.title",
    )
    .bind(library_id)
    .bind(read_book_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| RecommendedBook {
            book_id: row.get("recommended_book_id"),
            title: Some(row.get("title")),
            author: Some(row.get("author")),
            times_recommended: row.get("times_recommended"),
        })
        .collect())
}

/// Recommended books for a read book across all libraries, with counts,
/// most-suggested first
pub async fn find_recommended_with_count_all(
    pool: &SqlitePool,
    read_book_id: BookId,
) -> Result<Vec<RecommendedBook>> {
    let rows = sqlx::query(
        "SELECT r.recommended_book_id, b.title, b.author,
                COUNT(*) AS times_recommended
         FROM recommendations r
         INNER JOIN books b ON r.recommended_book_id = b.id
         WHERE r.read_book_id = ?
         GROUP BY r.recommended_book_id
         ORDER BY times_recommended DESC, b.title",
    )
    .bind(read_book_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| RecommendedBook {
            book_id: row.get("recommended_book_id"),
            title: Some(row.get("title")),
            author: Some(row.get("author")),
            times_recommended: row.get("times_recommended"),
        })
        .collect())
}

/// A user's recommendations as raw keys, comments and timestamps
pub async fn list_by_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Recommendation>> {
    let rows = sqlx::query(
        "SELECT user_id, library_id, read_book_id, recommended_book_id,
                comment, created_at
         FROM recommendations
         WHERE user_id = ?
         ORDER BY created_at, id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Recommendation {
            user_id: row.get("user_id"),
            library_id: row.get("library_id"),
            read_book_id: row.get("read_book_id"),
            recommended_book_id: row.get("recommended_book_id"),
            comment: row.get("comment"),
            created_at: row.get("created_at"),
        })
        .collect())
}

/// A user's recommendations joined with titles, authors and library
/// names, ordered by library name, read title, recommended title
pub async fn list_detailed_by_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<RecommendationDetail>> {
    let rows = sqlx::query(
        "SELECT l.name AS library_name,
                r.read_book_id, rb.title AS read_title, rb.author AS read_author,
                r.recommended_book_id, sb.title AS recommended_title,
                sb.author AS recommended_author,
                r.comment, r.created_at
         FROM recommendations r
         INNER JOIN libraries l ON r.library_id = l.id
         INNER JOIN books rb ON r.read_book_id = rb.id
         INNER JOIN books sb ON r.recommended_book_id = sb.id
         WHERE r.user_id = ?
         ORDER BY l.name, rb.title, sb.title",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| RecommendationDetail {
            library_name: row.get("library_name"),
            read_book_id: row.get("read_book_id"),
            read_title: row.get("read_title"),
            read_author: row.get("read_author"),
            recommended_book_id: row.get("recommended_book_id"),
            recommended_title: row.get("recommended_title"),
            recommended_author: row.get("recommended_author"),
            comment: row.get("comment"),
            created_at: row.get("created_at"),
        })
        .collect())
}

/// Replace the commentary of one recommendation
pub async fn update_comment(
    pool: &SqlitePool,
    key: &RecommendationKey,
    comment: &str,
) -> Result<()> {
    let result = sqlx::query(
        "UPDATE recommendations SET comment = ?
         WHERE user_id = ? AND library_id = ?
           AND read_book_id = ? AND recommended_book_id = ?",
    )
    .bind(comment)
    .bind(&key.user_id)
    .bind(key.library_id)
    .bind(key.read_book_id)
    .bind(key.recommended_book_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::not_found(
            "Recommendation",
            key.recommended_book_id,
        ));
    }

    Ok(())
}

/// Delete one recommendation by its full key
pub async fn delete(pool: &SqlitePool, key: &RecommendationKey) -> Result<()> {
    let result = sqlx::query(
        "DELETE FROM recommendations
         WHERE user_id = ? AND library_id = ?
           AND read_book_id = ? AND recommended_book_id = ?",
    )
    .bind(&key.user_id)
    .bind(key.library_id)
    .bind(key.read_book_id)
    .bind(key.recommended_book_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::not_found(
            "Recommendation",
            key.recommended_book_id,
        ));
    }

    Ok(())
}
