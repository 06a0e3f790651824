//! Shelf Core
//!
//! Domain types and error handling for Shelf, a client-server book
//! cataloguing application.
//!
//! This crate defines:
//! - **Domain Types**: `Book`, `Library`, `Recommendation`, `Rating`, `User`
//! - **Error Handling**: Unified `ShelfError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use shelf_core::types::CriterionScores;
//!
//! let scores = CriterionScores {
//!     style: 5,
//!     content: 4,
//!     enjoyment: 3,
//!     originality: 5,
//!     edition: 4,
//! };
//! assert!(scores.validate().is_ok());
//! assert!((scores.mean() - 4.2).abs() < 1e-9);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ShelfError};

pub use types::{
    // Catalog
    Book, BookId, NewBook,
    // Libraries
    Library, LibraryBook, LibraryId,
    // Recommendations
    NewRecommendation, Recommendation, RecommendationDetail, RecommendationKey, RecommendedBook,
    // Ratings
    Criterion, CriterionNotes, CriterionScores, NewRating, Rating, RatingDetail, RatingSummary,
    UpdateRating,
    // Users
    NewUser, User, UserId,
};
