//! User account types

use serde::{Deserialize, Serialize};

/// User account
///
/// The password hash never leaves the storage layer; this type carries
/// only the public profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique username (the identity key)
    pub username: String,

    /// Given name
    pub name: String,

    /// Family name
    pub surname: String,

    /// Email address, unique across accounts
    pub email: String,

    /// National id, unique across accounts
    pub national_id: String,

    /// Account creation timestamp
    pub created_at: String,
}

/// Data for registering an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Unique username
    pub username: String,

    /// Given name
    pub name: String,

    /// Family name
    pub surname: String,

    /// Email address
    pub email: String,

    /// National id
    pub national_id: String,
}
