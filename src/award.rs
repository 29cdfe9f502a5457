//! Award CRUD.
//!
//! Award ids are not autoincremented by the store. A new award takes
//! `MAX(id) + 1`, read and written inside one `BEGIN IMMEDIATE` transaction
//! so two concurrent creates cannot pick the same id.

use rusqlite::{params, Connection, TransactionBehavior};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db::Database;
use crate::error::{CatalogError, CatalogResult, StoreError};
use crate::params::{body_string, BodyInt};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub award_id: i64,
    pub name: String,
}

/// Body of `POST /api/award`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAward {
    pub name: String,
}

impl NewAward {
    pub fn from_body(body: &Map<String, Value>) -> CatalogResult<Self> {
        match body_string(body, "name") {
            None => Err(CatalogError::validation("Missing parameter: name")),
            Some(Err(())) => Err(CatalogError::validation("Invalid name. Must be a string.")),
            Some(Ok(name)) => Ok(Self { name }),
        }
    }
}

/// Body of `PATCH /api/award`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardRename {
    pub award_id: i64,
    pub name: String,
}

impl AwardRename {
    pub fn from_body(body: &Map<String, Value>) -> CatalogResult<Self> {
        let award_id = BodyInt::read(body, "award_id");
        let name = body_string(body, "name");
        if award_id.is_missing() || name.is_none() {
            return Err(CatalogError::validation(
                "Missing parameter(s): award_id and/or name",
            ));
        }
        let BodyInt::Value(award_id) = award_id else {
            return Err(CatalogError::validation("Invalid award_id. Must be an integer."));
        };
        match name {
            Some(Ok(name)) => Ok(Self { award_id, name }),
            _ => Err(CatalogError::validation("Invalid name. Must be a string.")),
        }
    }
}

/// `award_id` from the body of `DELETE /api/award`.
pub fn award_id_from_body(body: &Map<String, Value>) -> CatalogResult<i64> {
    match BodyInt::read(body, "award_id") {
        BodyInt::Missing => Err(CatalogError::validation("Missing parameter: award_id")),
        BodyInt::Invalid => Err(CatalogError::validation("Invalid award_id. Must be an integer.")),
        BodyInt::Value(award_id) => Ok(award_id),
    }
}

fn award_not_found() -> CatalogError {
    CatalogError::NotFound("Award not found".to_string())
}

/// A rejected insert or rename. A clash on the unique name is reported on
/// its own; anything else keeps the operation's context.
fn write_error(context: &'static str, err: rusqlite::Error) -> CatalogError {
    let err = StoreError::from(err);
    if err.is_unique_violation() {
        CatalogError::DuplicateAwardName
    } else {
        CatalogError::storage(context, err)
    }
}

pub struct AwardService {
    conn: Connection,
}

impl AwardService {
    pub fn connect(db: &Database) -> CatalogResult<Self> {
        Ok(Self {
            conn: db.connect()?,
        })
    }

    /// All awards ordered by id.
    pub fn list(&self) -> CatalogResult<Vec<Award>> {
        self.query_all()
            .map_err(|err| CatalogError::storage("Failed to get awards", err))
    }

    fn query_all(&self) -> rusqlite::Result<Vec<Award>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM award ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Award {
                award_id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        rows.collect()
    }

    /// Insert a new award and return its id.
    pub fn create(&mut self, name: &str) -> CatalogResult<i64> {
        let award_id = self
            .insert_next(name)
            .map_err(|err| write_error("Failed to create award", err))?;
        tracing::info!(award_id, "award created");
        Ok(award_id)
    }

    fn insert_next(&mut self, name: &str) -> rusqlite::Result<i64> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let max_id: Option<i64> =
            tx.query_row("SELECT MAX(id) FROM award", [], |row| row.get(0))?;
        let next_id = max_id.unwrap_or(0) + 1;
        tx.execute(
            "INSERT INTO award (id, name) VALUES (?1, ?2)",
            params![next_id, name],
        )?;
        tx.commit()?;
        Ok(next_id)
    }

    /// Rename an award.
    pub fn update(&self, award_id: i64, name: &str) -> CatalogResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE award SET name = ?1 WHERE id = ?2",
                params![name, award_id],
            )
            .map_err(|err| write_error("Failed to update award", err))?;
        if changed == 0 {
            return Err(award_not_found());
        }
        tracing::info!(award_id, "award renamed");
        Ok(())
    }

    pub fn delete(&self, award_id: i64) -> CatalogResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM award WHERE id = ?1", params![award_id])
            .map_err(|err| CatalogError::storage("Failed to delete award", err))?;
        if changed == 0 {
            return Err(award_not_found());
        }
        tracing::info!(award_id, "award deleted");
        Ok(())
    }
}
