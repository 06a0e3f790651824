//! ID aliases for Shelf entities
//!
//! Books and libraries are keyed by their database rowid; users are keyed
//! by their unique username.

/// Book identifier (catalog rowid)
pub type BookId = i64;

/// Library identifier (rowid, resolved from an owner + name pair)
pub type LibraryId = i64;

/// User identifier (unique username)
pub type UserId = String;
