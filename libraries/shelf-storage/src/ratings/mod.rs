//! Rating queries
//!
//! One rating per (user, book), five criterion scores in [1, 5] plus an
//! overall score. Saving resolves-or-creates the library and inserts the
//! rating inside a single transaction, so concurrent saves cannot leave a
//! duplicate library or a half-written rating behind. Aggregates treat an
//! unrated book as zero, never as an error.

use crate::libraries;
use shelf_core::{error::Result, types::*, ShelfError};
use sqlx::{Row, SqlitePool};

fn rating_from_row(row: &sqlx::sqlite::SqliteRow) -> Rating {
    Rating {
        user_id: row.get("user_id"),
        book_id: row.get("book_id"),
        library_id: row.get("library_id"),
        scores: CriterionScores {
            style: row.get("style_score"),
            content: row.get("content_score"),
            enjoyment: row.get("enjoyment_score"),
            originality: row.get("originality_score"),
            edition: row.get("edition_score"),
        },
        notes: CriterionNotes {
            style: row.get("style_note"),
            content: row.get("content_note"),
            enjoyment: row.get("enjoyment_note"),
            originality: row.get("originality_note"),
            edition: row.get("edition_note"),
        },
        overall: row.get("overall"),
        final_comment: row.get("final_comment"),
        created_at: row.get("created_at"),
    }
}

const RATING_COLUMNS: &str = "user_id, book_id, library_id,
    style_score, content_score, enjoyment_score, originality_score, edition_score,
    style_note, content_note, enjoyment_note, originality_note, edition_note,
    overall, final_comment, created_at";

/// Whether the user has already rated the book
pub async fn is_rated(pool: &SqlitePool, user_id: &str, book_id: BookId) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM ratings WHERE user_id = ? AND book_id = ?",
    )
    .bind(user_id)
    .bind(book_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Save a new rating
///
/// Scores are validated before any write. The library named by
/// `library_name` is resolved or created and the rating inserted in one
/// transaction; a second rating for the same (user, book) is a duplicate
/// rejection regardless of interleaving.
pub async fn save(
    pool: &SqlitePool,
    user_id: &str,
    book_id: BookId,
    library_name: &str,
    rating: NewRating,
) -> Result<Rating> {
    rating.validate()?;

    let mut tx = pool.begin().await?;

    let library_id = libraries::get_or_create(&mut *tx, user_id, library_name).await?;

    let result = sqlx::query(
        "INSERT INTO ratings
             (user_id, book_id, library_id,
              style_score, content_score, enjoyment_score, originality_score, edition_score,
              style_note, content_note, enjoyment_note, originality_note, edition_note,
              overall, final_comment)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT(user_id, book_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(book_id)
    .bind(library_id)
    .bind(rating.scores.style)
    .bind(rating.scores.content)
    .bind(rating.scores.enjoyment)
    .bind(rating.scores.originality)
    .bind(rating.scores.edition)
    .bind(&rating.notes.style)
    .bind(&rating.notes.content)
    .bind(&rating.notes.enjoyment)
    .bind(&rating.notes.originality)
    .bind(&rating.notes.edition)
    .bind(rating.overall)
    .bind(&rating.final_comment)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::duplicate(format!(
            "user {} has already rated book {}",
            user_id, book_id
        )));
    }

    let created_at =
        sqlx::query_scalar::<_, String>("SELECT created_at FROM ratings WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(&mut *tx)
            .await?;

    tx.commit().await?;

    Ok(Rating {
        user_id: user_id.to_string(),
        book_id,
        library_id,
        scores: rating.scores,
        notes: rating.notes,
        overall: rating.overall,
        final_comment: rating.final_comment,
        created_at,
    })
}

/// Every rating for a book, for full-detail display
pub async fn get_for_book(pool: &SqlitePool, book_id: BookId) -> Result<Vec<Rating>> {
    let rows = sqlx::query(&format!(
        "SELECT {RATING_COLUMNS} FROM ratings WHERE book_id = ? ORDER BY created_at, id"
    ))
    .bind(book_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(rating_from_row).collect())
}

/// One user's rating of one book
pub async fn get(pool: &SqlitePool, user_id: &str, book_id: BookId) -> Result<Option<Rating>> {
    let row = sqlx::query(&format!(
        "SELECT {RATING_COLUMNS} FROM ratings WHERE user_id = ? AND book_id = ?"
    ))
    .bind(user_id)
    .bind(book_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| rating_from_row(&row)))
}

/// Mean overall score across all raters of a book, 0.0 when unrated
pub async fn average_overall(pool: &SqlitePool, book_id: BookId) -> Result<f64> {
    let avg = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(AVG(overall), 0.0) FROM ratings WHERE book_id = ?",
    )
    .bind(book_id)
    .fetch_one(pool)
    .await?;

    Ok(avg)
}

/// Number of ratings for a book
pub async fn count_for_book(pool: &SqlitePool, book_id: BookId) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ratings WHERE book_id = ?")
        .bind(book_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Mean score of one criterion across all raters of a book, 0.0 when unrated
pub async fn average_of(pool: &SqlitePool, criterion: Criterion, book_id: BookId) -> Result<f64> {
    let column = match criterion {
        Criterion::Style => "style_score",
        Criterion::Content => "content_score",
        Criterion::Enjoyment => "enjoyment_score",
        Criterion::Originality => "originality_score",
        Criterion::Edition => "edition_score",
    };

    let avg = sqlx::query_scalar::<_, f64>(&format!(
        "SELECT COALESCE(AVG({column}), 0.0) FROM ratings WHERE book_id = ?"
    ))
    .bind(book_id)
    .fetch_one(pool)
    .await?;

    Ok(avg)
}

/// Rating count and all six averages for a book in one round trip
pub async fn summary(pool: &SqlitePool, book_id: BookId) -> Result<RatingSummary> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS count,
                COALESCE(AVG(overall), 0.0) AS overall,
                COALESCE(AVG(style_score), 0.0) AS style,
                COALESCE(AVG(content_score), 0.0) AS content,
                COALESCE(AVG(enjoyment_score), 0.0) AS enjoyment,
                COALESCE(AVG(originality_score), 0.0) AS originality,
                COALESCE(AVG(edition_score), 0.0) AS edition
         FROM ratings
         WHERE book_id = ?",
    )
    .bind(book_id)
    .fetch_one(pool)
    .await?;

    Ok(RatingSummary {
        count: row.get("count"),
        overall: row.get("overall"),
        style: row.get("style"),
        content: row.get("content"),
        enjoyment: row.get("enjoyment"),
        originality: row.get("originality"),
        edition: row.get("edition"),
    })
}

/// A user's ratings joined with book and library names, ordered by book title
pub async fn list_detailed_by_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<RatingDetail>> {
    let rows = sqlx::query(
        "SELECT r.book_id, b.title AS book_title, b.author AS book_author,
                l.name AS library_name,
                r.style_score, r.content_score, r.enjoyment_score,
                r.originality_score, r.edition_score,
                r.overall, r.final_comment, r.created_at
         FROM ratings r
         INNER JOIN books b ON r.book_id = b.id
         INNER JOIN libraries l ON r.library_id = l.id
         WHERE r.user_id = ?
         ORDER BY b.title",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| RatingDetail {
            book_id: row.get("book_id"),
            book_title: row.get("book_title"),
            book_author: row.get("book_author"),
            library_name: row.get("library_name"),
            scores: CriterionScores {
                style: row.get("style_score"),
                content: row.get("content_score"),
                enjoyment: row.get("enjoyment_score"),
                originality: row.get("originality_score"),
                edition: row.get("edition_score"),
            },
            overall: row.get("overall"),
            final_comment: row.get("final_comment"),
            created_at: row.get("created_at"),
        })
        .collect())
}

/// Replace all mutable fields of a rating
pub async fn update(
    pool: &SqlitePool,
    user_id: &str,
    book_id: BookId,
    rating: UpdateRating,
) -> Result<()> {
    rating.validate()?;

    let result = sqlx::query(
        "UPDATE ratings SET
             style_score = ?, content_score = ?, enjoyment_score = ?,
             originality_score = ?, edition_score = ?,
             style_note = ?, content_note = ?, enjoyment_note = ?,
             originality_note = ?, edition_note = ?,
             overall = ?, final_comment = ?
         WHERE user_id = ? AND book_id = ?",
    )
    .bind(rating.scores.style)
    .bind(rating.scores.content)
    .bind(rating.scores.enjoyment)
    .bind(rating.scores.originality)
    .bind(rating.scores.edition)
    .bind(&rating.notes.style)
    .bind(&rating.notes.content)
    .bind(&rating.notes.enjoyment)
    .bind(&rating.notes.originality)
    .bind(&rating.notes.edition)
    .bind(rating.overall)
    .bind(&rating.final_comment)
    .bind(user_id)
    .bind(book_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::not_found("Rating", book_id));
    }

    Ok(())
}

/// Delete a user's rating of a book
pub async fn delete(pool: &SqlitePool, user_id: &str, book_id: BookId) -> Result<()> {
    let result = sqlx::query("DELETE FROM ratings WHERE user_id = ? AND book_id = ?")
        .bind(user_id)
        .bind(book_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfError::not_found("Rating", book_id));
    }

    Ok(())
}
