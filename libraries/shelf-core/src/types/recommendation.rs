//! Recommendation types
//!
//! A recommendation is a directed suggestion ("having read book A, I
//! recommend book B") made by a user and scoped to one of their
//! libraries.

use super::ids::{BookId, LibraryId, UserId};
use serde::{Deserialize, Serialize};

/// How many distinct books a user may recommend for a single read book.
pub const MAX_RECOMMENDATIONS_PER_READ_BOOK: i64 = 3;

/// A stored recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Recommending user
    pub user_id: UserId,

    /// Library the recommendation is scoped to
    pub library_id: LibraryId,

    /// The book the user has read
    pub read_book_id: BookId,

    /// The book being suggested
    pub recommended_book_id: BookId,

    /// Free-text commentary
    pub comment: String,

    /// Creation timestamp
    pub created_at: String,
}

/// Data for creating a recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecommendation {
    /// Recommending user
    pub user_id: UserId,

    /// Library the recommendation is scoped to
    pub library_id: LibraryId,

    /// The book the user has read
    pub read_book_id: BookId,

    /// The book being suggested
    pub recommended_book_id: BookId,

    /// Free-text commentary
    pub comment: String,
}

/// The full key identifying a single recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationKey {
    /// Recommending user
    pub user_id: UserId,

    /// Library the recommendation is scoped to
    pub library_id: LibraryId,

    /// The book the user has read
    pub read_book_id: BookId,

    /// The book being suggested
    pub recommended_book_id: BookId,
}

/// A recommended book with its suggestion count, for grouped listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedBook {
    /// The suggested book
    pub book_id: BookId,

    /// Denormalized title for display
    pub title: Option<String>,

    /// Denormalized author for display
    pub author: Option<String>,

    /// How many times the book has been suggested for the read book
    pub times_recommended: i64,
}

/// A recommendation joined with display names, for per-user listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationDetail {
    /// Library the recommendation is scoped to
    pub library_name: String,

    /// The book the user has read
    pub read_book_id: BookId,

    /// Read book title
    pub read_title: String,

    /// Read book author
    pub read_author: String,

    /// The book being suggested
    pub recommended_book_id: BookId,

    /// Suggested book title
    pub recommended_title: String,

    /// Suggested book author
    pub recommended_author: String,

    /// Free-text commentary
    pub comment: String,

    /// Creation timestamp
    pub created_at: String,
}
