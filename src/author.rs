//! Author listing.

use std::collections::HashMap;

use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::{CatalogError, CatalogResult};
use crate::params::{optional_id, optional_page};
use crate::query::{search_pattern, Paging, SelectBuilder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub author_id: i64,
    pub name: String,
}

/// Filters accepted by `GET /api/author`. Every field is optional and the
/// present ones are combined with `AND`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFilter {
    pub author_id: Option<i64>,
    /// Only authors of this content item.
    pub content_id: Option<i64>,
    /// Case-insensitive substring of the author name.
    pub search: Option<String>,
    /// 1-indexed page. `None` returns every match.
    pub page: Option<i64>,
}

impl AuthorFilter {
    /// Validate sanitized query parameters, in the order `author_id`,
    /// `content_id`, `page`.
    pub fn from_params(params: &HashMap<String, String>) -> CatalogResult<Self> {
        Ok(Self {
            author_id: optional_id(params, "author_id")?,
            content_id: optional_id(params, "content_id")?,
            search: params.get("search").cloned(),
            page: optional_page(params)?,
        })
    }

    fn to_sql(&self) -> (String, Vec<SqlValue>) {
        let mut select = SelectBuilder::new("SELECT DISTINCT a.id, a.name FROM author a");

        if let Some(author_id) = self.author_id {
            select.filter("a.id = ?", [SqlValue::Integer(author_id)]);
        }

        if let Some(content_id) = self.content_id {
            select.join("INNER JOIN content_has_author cha ON a.id = cha.author");
            select.filter("cha.content = ?", [SqlValue::Integer(content_id)]);
        }

        if let Some(search) = &self.search {
            select.filter("LOWER(a.name) LIKE LOWER(?)", [search_pattern(search)]);
        }

        select.build("a.name", Paging::WhenRequested, self.page)
    }
}

pub struct AuthorService {
    conn: Connection,
}

impl AuthorService {
    pub fn connect(db: &Database) -> CatalogResult<Self> {
        Ok(Self {
            conn: db.connect()?,
        })
    }

    pub fn list(&self, filter: &AuthorFilter) -> CatalogResult<Vec<Author>> {
        let (sql, bindings) = filter.to_sql();
        self.query(&sql, bindings)
            .map_err(|err| CatalogError::storage("Database query failed", err))
    }

    fn query(&self, sql: &str, bindings: Vec<SqlValue>) -> rusqlite::Result<Vec<Author>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params_from_iter(bindings), |row| {
            Ok(Author {
                author_id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        rows.collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn unfiltered_query_has_no_limit() {
        let (sql, bindings) = AuthorFilter::default().to_sql();
        assert_eq!(sql, "SELECT DISTINCT a.id, a.name FROM author a ORDER BY a.name");
        assert!(bindings.is_empty());
    }

    #[test]
    fn content_filter_adds_the_join() {
        let filter = AuthorFilter {
            content_id: Some(9),
            page: Some(2),
            ..Default::default()
        };
        let (sql, bindings) = filter.to_sql();
        assert!(sql.contains("INNER JOIN content_has_author cha"));
        assert!(sql.ends_with("ORDER BY a.name LIMIT 10 OFFSET ?"));
        assert_eq!(bindings, vec![SqlValue::Integer(9), SqlValue::Integer(10)]);
    }

    #[test]
    fn search_term_is_lowercased_and_wrapped() {
        let filter = AuthorFilter {
            search: Some("SMith".into()),
            ..Default::default()
        };
        let (_, bindings) = filter.to_sql();
        assert_eq!(bindings, vec![SqlValue::Text("%smith%".into())]);
    }

    #[test]
    fn author_id_is_validated_before_content_id() {
        let err = AuthorFilter::from_params(&params(&[("author_id", "x"), ("content_id", "y")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid author_id. Must be an integer.");

        let err = AuthorFilter::from_params(&params(&[("content_id", "y"), ("page", "0")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid content_id. Must be an integer.");
    }
}
