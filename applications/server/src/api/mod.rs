/// API route modules
pub mod auth;
pub mod books;
pub mod health;
pub mod libraries;
pub mod ratings;
pub mod recommendations;
