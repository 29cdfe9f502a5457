//! Award assignment: the `content_has_award` association.
//!
//! A content item carries at most one award. The store has no constraint for
//! this, so [`AwardAssignmentService::assign`] counts existing rows and
//! inserts within a single immediate transaction.

use rusqlite::{params, Connection, TransactionBehavior};
use serde_json::{Map, Value};

use crate::db::Database;
use crate::error::{CatalogError, CatalogResult};
use crate::params::BodyInt;

/// Body of `POST /api/manage_awards`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwardAssignment {
    pub content_id: i64,
    pub award_id: i64,
}

impl AwardAssignment {
    pub fn from_body(body: &Map<String, Value>) -> CatalogResult<Self> {
        let content_id = BodyInt::read(body, "content_id");
        let award_id = BodyInt::read(body, "award_id");
        if content_id.is_missing() || award_id.is_missing() {
            return Err(CatalogError::validation(
                "Missing parameter: content_id and/or award_id",
            ));
        }
        match (content_id, award_id) {
            (BodyInt::Value(content_id), BodyInt::Value(award_id)) => Ok(Self {
                content_id,
                award_id,
            }),
            _ => Err(CatalogError::validation(
                "Invalid parameter: content_id and award_id must be integers",
            )),
        }
    }
}

/// `content_id` from the body of `DELETE /api/manage_awards`.
pub fn content_id_from_body(body: &Map<String, Value>) -> CatalogResult<i64> {
    match BodyInt::read(body, "content_id") {
        BodyInt::Missing => Err(CatalogError::validation("Missing parameter: content_id")),
        BodyInt::Invalid => Err(CatalogError::validation(
            "Invalid parameter: content_id must be an integer",
        )),
        BodyInt::Value(content_id) => Ok(content_id),
    }
}

/// Outcome of the check-then-insert transaction.
enum Assigned {
    Inserted,
    AlreadyAwarded,
}

pub struct AwardAssignmentService {
    conn: Connection,
}

impl AwardAssignmentService {
    pub fn connect(db: &Database) -> CatalogResult<Self> {
        Ok(Self {
            conn: db.connect()?,
        })
    }

    pub fn assign(&mut self, assignment: AwardAssignment) -> CatalogResult<()> {
        let outcome = self
            .insert_if_unawarded(assignment)
            .map_err(|err| CatalogError::storage("Failed to assign award", err))?;
        match outcome {
            Assigned::Inserted => {
                tracing::info!(
                    content_id = assignment.content_id,
                    award_id = assignment.award_id,
                    "award assigned"
                );
                Ok(())
            }
            Assigned::AlreadyAwarded => Err(CatalogError::AwardAlreadyAssigned),
        }
    }

    fn insert_if_unawarded(&mut self, assignment: AwardAssignment) -> rusqlite::Result<Assigned> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let existing: i64 = tx.query_row(
            "SELECT COUNT(*) FROM content_has_award WHERE content = ?1",
            params![assignment.content_id],
            |row| row.get(0),
        )?;
        if existing > 0 {
            // dropping `tx` rolls back
            return Ok(Assigned::AlreadyAwarded);
        }
        tx.execute(
            "INSERT INTO content_has_award (content, award) VALUES (?1, ?2)",
            params![assignment.content_id, assignment.award_id],
        )?;
        tx.commit()?;
        Ok(Assigned::Inserted)
    }

    /// Remove the award mapping of `content_id`.
    pub fn remove(&self, content_id: i64) -> CatalogResult<()> {
        let removed = self
            .conn
            .execute(
                "DELETE FROM content_has_award WHERE content = ?1",
                params![content_id],
            )
            .map_err(|err| CatalogError::storage("Failed to remove award", err))?;
        if removed == 0 {
            return Err(CatalogError::NotFound(
                "No award found for the given content_id".to_string(),
            ));
        }
        tracing::info!(content_id, "award removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn assignment_requires_both_ids() {
        let err = AwardAssignment::from_body(&body(json!({ "content_id": 1 }))).unwrap_err();
        assert_eq!(err.to_string(), "Missing parameter: content_id and/or award_id");

        let err = AwardAssignment::from_body(&body(json!({ "content_id": 1, "award_id": "b" })))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid parameter: content_id and award_id must be integers"
        );

        let ok = AwardAssignment::from_body(&body(json!({ "content_id": "3", "award_id": 4 })))
            .unwrap();
        assert_eq!(
            ok,
            AwardAssignment {
                content_id: 3,
                award_id: 4
            }
        );
    }

    #[test]
    fn removal_requires_numeric_content_id() {
        assert_eq!(
            content_id_from_body(&body(json!({}))).unwrap_err().to_string(),
            "Missing parameter: content_id"
        );
        assert_eq!(
            content_id_from_body(&body(json!({ "content_id": "x" })))
                .unwrap_err()
                .to_string(),
            "Invalid parameter: content_id must be an integer"
        );
        assert_eq!(content_id_from_body(&body(json!({ "content_id": 12 }))).unwrap(), 12);
    }
}
