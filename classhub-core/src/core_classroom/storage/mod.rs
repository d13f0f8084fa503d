//! SQLite-backed persistence for users, classrooms, and memberships

pub mod migrations;
pub mod sql_store;

pub use sql_store::ClassroomSqlStore;

use thiserror::Error;

/// Persistence-layer failures.
///
/// Constraint violations are classified so callers can tell a uniqueness
/// conflict (email, invite code, membership pair) from a dangling reference;
/// everything else propagates as-is.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("unique constraint violated on {0}")]
    UniqueViolation(&'static str),

    #[error("foreign key constraint violated on {0}")]
    ForeignKeyViolation(&'static str),
}
