//! Composable SQL for the list and partial-update endpoints.
//!
//! Every user-supplied value goes through `push_bind`, so placeholder
//! numbering is allocated by `sqlx::QueryBuilder` in the order clauses are
//! appended. Table and column names are compile-time constants only.

use serde::Deserialize;
use sqlx::{Encode, Postgres, QueryBuilder, Type};

const MAX_PER_PAGE: u32 = 100;

/// A column the free-text search is matched against.
#[derive(Debug, Clone, Copy)]
pub enum SearchTarget {
    /// Plain text column, matched with `ILIKE`.
    Text(&'static str),
    /// `TEXT[]` column, matched when any element matches.
    TextArray(&'static str),
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
pub struct Pagination {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl Pagination {
    /// `(LIMIT, OFFSET)` when the caller asked for paging, `None` otherwise.
    pub fn limit_offset(&self) -> Option<(i64, i64)> {
        let per_page = self.per_page?.clamp(1, MAX_PER_PAGE) as i64;
        let page = self.page.unwrap_or(1).max(1) as i64;
        Some((per_page, (page - 1) * per_page))
    }
}

/// Escapes `LIKE` metacharacters so a search term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// `SELECT * FROM <table> WHERE 1=1 [AND ...] [ORDER BY ...] [LIMIT/OFFSET]`.
///
/// Predicates must be added before `order_by_desc` and `paginate`.
pub struct FilteredSelect<'args> {
    builder: QueryBuilder<'args, Postgres>,
}

impl<'args> FilteredSelect<'args> {
    pub fn new(table: &'static str) -> Self {
        FilteredSelect {
            builder: QueryBuilder::new(format!("SELECT * FROM {table} WHERE 1=1")),
        }
    }

    /// `AND column = $n`, skipped when `value` is `None`.
    pub fn eq<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.builder.push(" AND ").push(column).push(" = ").push_bind(value);
        }
        self
    }

    /// Appends a fixed predicate without bound values.
    pub fn condition(&mut self, enabled: bool, predicate: &'static str) -> &mut Self {
        if enabled {
            self.builder.push(" AND ").push(predicate);
        }
        self
    }

    /// `AND (t1 ILIKE $n OR t2 ILIKE $n+1 ...)`, binding the pattern once per
    /// branch. Blank terms add nothing.
    pub fn search(&mut self, term: Option<&str>, targets: &[SearchTarget]) -> &mut Self {
        let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
            return self;
        };
        if targets.is_empty() {
            return self;
        }

        let pattern = format!("%{}%", escape_like(term));

        self.builder.push(" AND (");
        for (i, target) in targets.iter().enumerate() {
            if i > 0 {
                self.builder.push(" OR ");
            }
            match target {
                SearchTarget::Text(column) => {
                    self.builder
                        .push(*column)
                        .push(" ILIKE ")
                        .push_bind(pattern.clone());
                }
                SearchTarget::TextArray(column) => {
                    self.builder
                        .push("EXISTS (SELECT 1 FROM unnest(")
                        .push(*column)
                        .push(") AS tag WHERE tag ILIKE ")
                        .push_bind(pattern.clone())
                        .push(")");
                }
            }
        }
        self.builder.push(")");
        self
    }

    pub fn order_by_desc(&mut self, columns: &[&'static str]) -> &mut Self {
        for (i, column) in columns.iter().enumerate() {
            self.builder
                .push(if i == 0 { " ORDER BY " } else { ", " })
                .push(*column)
                .push(" DESC");
        }
        self
    }

    pub fn paginate(&mut self, pagination: Pagination) -> &mut Self {
        if let Some((limit, offset)) = pagination.limit_offset() {
            self.builder.push(" LIMIT ").push_bind(limit);
            self.builder.push(" OFFSET ").push_bind(offset);
        }
        self
    }

    pub fn sql(&self) -> &str {
        self.builder.sql()
    }

    pub fn into_builder(self) -> QueryBuilder<'args, Postgres> {
        self.builder
    }
}

/// `UPDATE <table> SET <provided columns>, updated_at = NOW() WHERE id = $n RETURNING *`.
pub struct UpdateSet<'args> {
    builder: QueryBuilder<'args, Postgres>,
    assignments: usize,
}

impl<'args> UpdateSet<'args> {
    pub fn new(table: &'static str) -> Self {
        UpdateSet {
            builder: QueryBuilder::new(format!("UPDATE {table} SET ")),
            assignments: 0,
        }
    }

    /// Assigns `column` only when a value was provided.
    pub fn set<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            if self.assignments > 0 {
                self.builder.push(", ");
            }
            self.builder.push(column).push(" = ").push_bind(value);
            self.assignments += 1;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments == 0
    }

    /// Closes the statement for row `id`. `None` when nothing was assigned.
    pub fn finish(mut self, id: i32) -> Option<QueryBuilder<'args, Postgres>> {
        if self.is_empty() {
            return None;
        }
        self.builder
            .push(", updated_at = NOW() WHERE id = ")
            .push_bind(id)
            .push(" RETURNING *");
        Some(self.builder)
    }
}
