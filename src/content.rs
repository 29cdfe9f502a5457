//! Content listing with type and award resolution.
//!
//! Unlike the author listing, content is always capped at one page: omitting
//! `page` returns the first ten rows rather than the full table.

use std::collections::HashMap;

use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::{CatalogError, CatalogResult};
use crate::params::{optional_id, optional_page};
use crate::query::{search_pattern, Paging, SelectBuilder};

const SELECT_CONTENT: &str = "SELECT DISTINCT
        c.id AS content_id,
        c.title,
        c.abstract,
        c.doi_link,
        c.preview_video,
        t.name AS type,
        a.name AS award
    FROM content c
    INNER JOIN type t ON c.type = t.id
    LEFT JOIN content_has_award cha ON c.id = cha.content
    LEFT JOIN award a ON cha.award = a.id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub content_id: i64,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub doi_link: Option<String>,
    pub preview_video: Option<String>,
    #[serde(rename = "type")]
    pub content_type: String,
    pub award: Option<String>,
}

impl Content {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            content_id: row.get(0)?,
            title: row.get(1)?,
            abstract_text: non_empty(row.get(2)?),
            doi_link: non_empty(row.get(3)?),
            preview_video: non_empty(row.get(4)?),
            content_type: row.get(5)?,
            award: non_empty(row.get(6)?),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Filters accepted by `GET /api/content`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    pub content_id: Option<i64>,
    /// Only content written by this author.
    pub author_id: Option<i64>,
    /// Case-insensitive substring of the title or the abstract.
    pub search: Option<String>,
    pub page: Option<i64>,
}

impl ContentFilter {
    /// Validate sanitized query parameters, in the order `content_id`,
    /// `author_id`, `page`.
    pub fn from_params(params: &HashMap<String, String>) -> CatalogResult<Self> {
        Ok(Self {
            content_id: optional_id(params, "content_id")?,
            author_id: optional_id(params, "author_id")?,
            search: params.get("search").cloned(),
            page: optional_page(params)?,
        })
    }

    fn to_sql(&self) -> (String, Vec<SqlValue>) {
        let mut select = SelectBuilder::new(SELECT_CONTENT);

        if let Some(content_id) = self.content_id {
            select.filter("c.id = ?", [SqlValue::Integer(content_id)]);
        }

        if let Some(author_id) = self.author_id {
            select.join("INNER JOIN content_has_author ca ON c.id = ca.content");
            select.filter("ca.author = ?", [SqlValue::Integer(author_id)]);
        }

        if let Some(search) = &self.search {
            let pattern = search_pattern(search);
            select.filter(
                "(LOWER(c.title) LIKE LOWER(?) OR LOWER(c.abstract) LIKE LOWER(?))",
                [pattern.clone(), pattern],
            );
        }

        select.build("c.title", Paging::Always, self.page)
    }
}

pub struct ContentService {
    conn: Connection,
}

impl ContentService {
    pub fn connect(db: &Database) -> CatalogResult<Self> {
        Ok(Self {
            conn: db.connect()?,
        })
    }

    /// List content matching `filter`.
    ///
    /// Fails with [`CatalogError::ContentNotFound`] when a specific
    /// `content_id` was requested and nothing matched.
    pub fn list(&self, filter: &ContentFilter) -> CatalogResult<Vec<Content>> {
        let (sql, bindings) = filter.to_sql();
        let content = self
            .query(&sql, bindings)
            .map_err(|err| CatalogError::storage("Database query failed", err))?;

        if filter.content_id.is_some() && content.is_empty() {
            return Err(CatalogError::ContentNotFound);
        }
        Ok(content)
    }

    fn query(&self, sql: &str, bindings: Vec<SqlValue>) -> rusqlite::Result<Vec<Content>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params_from_iter(bindings), Content::from_row)?;
        rows.collect()
    }
}
