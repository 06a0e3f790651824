//! Book catalog types

use super::ids::BookId;
use serde::{Deserialize, Serialize};

/// A book in the read-only catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique book identifier
    pub id: BookId,

    /// Title
    pub title: String,

    /// Author display name
    pub author: String,

    /// Publication year
    pub year: Option<i64>,

    /// Publisher
    pub publisher: Option<String>,

    /// ISBN, where known
    pub isbn: Option<String>,
}

/// Data for inserting a catalog entry (seeding and tests)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    /// Title
    pub title: String,

    /// Author display name
    pub author: String,

    /// Publication year
    pub year: Option<i64>,

    /// Publisher
    pub publisher: Option<String>,

    /// ISBN, where known
    pub isbn: Option<String>,
}
