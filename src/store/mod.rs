//! Local persistence layer
//!
//! Keeps the last-known client registration and the last confirmed value of
//! each tag, scoped to the current installation. Uses SQLite with:
//! - Schema migrations via `PRAGMA user_version`
//! - A single connection guarded by a mutex

pub mod repo;
pub mod schema;

pub use repo::Store;
