use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".course-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "courses.sqlite";

/// Ensure the database file exists, create missing tables, and return a live
/// connection. Foreign-key enforcement is switched off explicitly: the
/// enrollment reference to `courses(code)` is declarative only, and deleting
/// a course must succeed even while enrollments still point at it.
pub fn ensure_schema() -> Result<Connection> {
    let db_path = db_path()?;

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(&db_path).context("failed to open SQLite database")?;
    create_tables(&conn)?;
    Ok(conn)
}

/// Idempotent table creation, shared between the on-disk database and the
/// in-memory connections the tests run against.
pub(crate) fn create_tables(conn: &Connection) -> Result<()> {
    // The bundled SQLite build turns foreign-key enforcement on by default
    // (SQLITE_DEFAULT_FOREIGN_KEYS=1), so the pragma cannot be left at its
    // upstream default. The setting is per-connection, which is why it lives
    // next to the DDL every connection runs.
    conn.execute_batch("PRAGMA foreign_keys = OFF")
        .context("failed to disable foreign key enforcement")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS courses (
            code TEXT PRIMARY KEY,
            name TEXT,
            faculty TEXT,
            fees TEXT
        )",
        [],
    )
    .context("failed to create courses table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS enrollments (
            student_name TEXT UNIQUE,
            course_code TEXT,
            FOREIGN KEY (course_code) REFERENCES courses(code)
        )",
        [],
    )
    .context("failed to create enrollments table")?;

    Ok(())
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
