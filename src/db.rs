//! Data access layer.
//!
//! [`Database`] only knows where the SQLite file lives. Every service opens
//! its own [`Connection`] through [`Database::connect`], so each request runs
//! against a fresh connection and nothing is shared between requests.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::{CatalogError, CatalogResult};

/// Bootstrap schema for development databases and tests.
///
/// Production deployments ship a populated file; this script only creates
/// tables that are missing and never alters existing ones.
pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS type (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS author (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS content (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        abstract TEXT,
        doi_link TEXT,
        preview_video TEXT,
        type INTEGER NOT NULL,
        FOREIGN KEY(type) REFERENCES type(id)
    );

    CREATE TABLE IF NOT EXISTS award (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS content_has_author (
        content INTEGER NOT NULL,
        author INTEGER NOT NULL,
        FOREIGN KEY(content) REFERENCES content(id),
        FOREIGN KEY(author) REFERENCES author(id)
    );

    CREATE TABLE IF NOT EXISTS content_has_award (
        content INTEGER NOT NULL,
        award INTEGER NOT NULL,
        FOREIGN KEY(content) REFERENCES content(id),
        FOREIGN KEY(award) REFERENCES award(id)
    );
";

/// Handle to the catalog database file.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a new connection for the current request.
    pub fn connect(&self) -> CatalogResult<Connection> {
        Connection::open(&self.path).map_err(|err| {
            tracing::error!(path = %self.path.display(), error = %err, "database connection failed");
            CatalogError::Connection(err)
        })
    }

    /// Create any missing catalog tables.
    pub fn ensure_schema(&self) -> CatalogResult<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)
            .map_err(|err| CatalogError::storage("Failed to initialize schema", err))?;
        tracing::info!(path = %self.path.display(), "catalog schema ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("catalog.sqlite"));
        db.ensure_schema().unwrap();
        db.ensure_schema().unwrap();

        let conn = db.connect().unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 6);
    }

    #[test]
    fn connect_to_unreachable_path_is_a_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("missing").join("catalog.sqlite"));
        let err = db.connect().unwrap_err();
        assert!(matches!(err, CatalogError::Connection(_)));
        assert!(err.to_string().starts_with("Database connection failed: "));
    }
}
