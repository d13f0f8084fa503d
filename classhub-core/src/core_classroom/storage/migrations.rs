//! Database migrations for the classroom schema
//!
//! Provides versioned migrations for the users/classrooms/memberships
//! schema. Each migration is applied atomically and tracked in the
//! schema_version table.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// Current schema version for the classroom store
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Migration descriptor
pub struct Migration {
    pub version: i32,
    pub description: &'static str,
    pub up_sql: &'static str,
    pub down_sql: Option<&'static str>,
}

/// All available migrations in order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            description: "Initial users, classrooms, and memberships schema",
            up_sql: r#"
                -- Schema version tracking
                CREATE TABLE IF NOT EXISTS schema_version (
                    version INTEGER PRIMARY KEY,
                    applied_at INTEGER NOT NULL
                );

                -- Users
                CREATE TABLE IF NOT EXISTS users (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    email TEXT NOT NULL UNIQUE,
                    name TEXT NOT NULL,
                    role TEXT NOT NULL CHECK(role IN ('student', 'educator', 'adult_learner', 'parent')),
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL,
                    -- Progress tracking placeholders, no behavior attached
                    accuracy_percentage REAL,
                    common_mistakes TEXT,
                    points INTEGER NOT NULL DEFAULT 0,
                    streak_days INTEGER NOT NULL DEFAULT 0,
                    achievements TEXT
                );

                -- Classrooms, each owned by one educator
                CREATE TABLE IF NOT EXISTS classrooms (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    description TEXT,
                    educator_id INTEGER NOT NULL REFERENCES users(id),
                    visibility TEXT NOT NULL CHECK(visibility IN ('private', 'public')),
                    invite_code TEXT NOT NULL UNIQUE,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_classrooms_educator ON classrooms(educator_id);

                -- Classroom memberships (join table)
                CREATE TABLE IF NOT EXISTS classroom_memberships (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    classroom_id INTEGER NOT NULL REFERENCES classrooms(id),
                    student_id INTEGER NOT NULL REFERENCES users(id),
                    joined_at INTEGER NOT NULL,
                    -- A student can only join a classroom once; this constraint
                    -- is the source of truth under concurrent joins
                    UNIQUE(classroom_id, student_id)
                );

                CREATE INDEX IF NOT EXISTS idx_memberships_student ON classroom_memberships(student_id);
                CREATE INDEX IF NOT EXISTS idx_memberships_classroom ON classroom_memberships(classroom_id);
            "#,
            down_sql: Some(
                r#"
                DROP INDEX IF EXISTS idx_memberships_classroom;
                DROP INDEX IF EXISTS idx_memberships_student;
                DROP TABLE IF EXISTS classroom_memberships;

                DROP INDEX IF EXISTS idx_classrooms_educator;
                DROP TABLE IF EXISTS classrooms;

                DROP TABLE IF EXISTS users;

                DROP TABLE IF EXISTS schema_version;
            "#,
            ),
        },
    ]
}

/// Get current schema version from database
fn get_current_version(pool: &Pool<SqliteConnectionManager>) -> Result<i32, rusqlite::Error> {
    let conn = pool.get().map_err(|e| {
        rusqlite::Error::ToSqlConversionFailure(Box::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to get connection: {}", e),
        )))
    })?;

    // Ensure schema_version table exists
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    let version: Result<i32, _> = conn.query_row(
        "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
        [],
        |row| row.get(0),
    );

    Ok(version.unwrap_or(0))
}

/// Run all pending migrations
pub fn migrate(pool: &Pool<SqliteConnectionManager>) -> Result<(), rusqlite::Error> {
    let current_version = get_current_version(pool)?;
    let migrations = get_migrations();

    let pending_migrations: Vec<_> = migrations
        .into_iter()
        .filter(|m| m.version > current_version)
        .collect();

    if pending_migrations.is_empty() {
        return Ok(());
    }

    let conn = pool.get().map_err(|e| {
        rusqlite::Error::ToSqlConversionFailure(Box::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to get connection: {}", e),
        )))
    })?;

    for migration in pending_migrations {
        let tx = conn.unchecked_transaction()?;

        tx.execute_batch(migration.up_sql)?;

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as i64;

        tx.execute(
            "INSERT INTO schema_version (version, applied_at) VALUES (?, ?)",
            params![migration.version, now],
        )?;

        tx.commit()?;

        info!(
            version = migration.version,
            "Applied migration: {}", migration.description
        );
    }

    Ok(())
}

/// Get the latest migration version available
pub fn get_latest_version() -> i32 {
    let migrations = get_migrations();
    migrations.iter().map(|m| m.version).max().unwrap_or(0)
}
