//! Dynamic `SELECT` assembly shared by the listing services.
//!
//! Every filter value is bound as a parameter; only fixed SQL fragments are
//! spliced into the statement text.

use rusqlite::types::Value as SqlValue;

use crate::params::{page_offset, PAGE_SIZE};

/// When a listing applies `LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Paging {
    /// Only when a page was requested; otherwise every row is returned.
    WhenRequested,
    /// Always one page; a missing page means the first.
    Always,
}

pub(crate) struct SelectBuilder {
    sql: String,
    clauses: Vec<&'static str>,
    bindings: Vec<SqlValue>,
}

impl SelectBuilder {
    pub(crate) fn new(select: &str) -> Self {
        Self {
            sql: select.to_string(),
            clauses: Vec::new(),
            bindings: Vec::new(),
        }
    }

    pub(crate) fn join(&mut self, join: &str) {
        self.sql.push(' ');
        self.sql.push_str(join);
    }

    /// `AND` a clause whose placeholders take `values`, in order.
    pub(crate) fn filter(
        &mut self,
        clause: &'static str,
        values: impl IntoIterator<Item = SqlValue>,
    ) {
        self.clauses.push(clause);
        self.bindings.extend(values);
    }

    pub(crate) fn build(
        mut self,
        order_by: &str,
        paging: Paging,
        page: Option<i64>,
    ) -> (String, Vec<SqlValue>) {
        if !self.clauses.is_empty() {
            self.sql.push_str(" WHERE ");
            self.sql.push_str(&self.clauses.join(" AND "));
        }

        self.sql.push_str(" ORDER BY ");
        self.sql.push_str(order_by);

        match (paging, page) {
            (_, Some(page)) => {
                self.sql.push_str(&format!(" LIMIT {PAGE_SIZE} OFFSET ?"));
                self.bindings.push(SqlValue::Integer(page_offset(page)));
            }
            (Paging::Always, None) => self.sql.push_str(&format!(" LIMIT {PAGE_SIZE}")),
            (Paging::WhenRequested, None) => {}
        }

        (self.sql, self.bindings)
    }
}

/// `LIKE` pattern for a case-insensitive substring search.
///
/// SQLite's `LOWER` folds ASCII letters only, so the term is folded the same
/// way; a non-ASCII capital must match itself verbatim.
pub(crate) fn search_pattern(term: &str) -> SqlValue {
    SqlValue::Text(format!("%{}%", term.to_ascii_lowercase()))
}
