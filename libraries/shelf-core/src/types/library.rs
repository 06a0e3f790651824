//! Library types
//!
//! A library is a named, user-owned collection of book references. Names
//! are unique per owner, not globally.

use super::ids::{BookId, LibraryId, UserId};
use serde::{Deserialize, Serialize};

/// A user-owned book collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Library {
    /// Unique library identifier
    pub id: LibraryId,

    /// Owning user
    pub owner_id: UserId,

    /// Name, unique within the owner's libraries
    pub name: String,

    /// Creation timestamp
    pub created_at: String,

    /// Member books (optional, populated when requested)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<LibraryBook>>,
}

/// A book's membership in a library, with denormalized display fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryBook {
    /// Member book
    pub book_id: BookId,

    /// When the book was added
    pub added_at: String,

    /// Denormalized title for display
    pub title: Option<String>,

    /// Denormalized author for display
    pub author: Option<String>,
}
