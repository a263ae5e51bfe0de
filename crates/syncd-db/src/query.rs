//! Query description for the generic model layer.
//!
//! A `QueryParam` carries everything a list call needs: projected fields,
//! conjunctive predicates, ordering and the page window. Rendering to SQL is
//! pure so the generated statements can be checked without a connection.

use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;

/// Comparison operator of a single predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tag {
    #[default]
    Eq,
    Like,
}

impl Tag {
    fn as_sql(self) -> &'static str {
        match self {
            Tag::Eq => "=",
            Tag::Like => "LIKE",
        }
    }
}

/// Bound value of a predicate or a written column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Value::Int(v) => v.to_sql(),
            Value::Text(v) => v.to_sql(),
        }
    }
}

/// One `field <tag> value` predicate. Field names are compile-time column
/// identifiers and are interpolated into SQL; values are always bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereParam {
    pub field: &'static str,
    pub tag: Tag,
    pub prepare: Value,
}

impl WhereParam {
    pub fn eq(field: &'static str, value: impl Into<Value>) -> Self {
        Self {
            field,
            tag: Tag::Eq,
            prepare: value.into(),
        }
    }

    pub fn like(field: &'static str, pattern: impl Into<Value>) -> Self {
        Self {
            field,
            tag: Tag::Like,
            prepare: pattern.into(),
        }
    }
}

/// Ordered conjunction of predicates. Insertion order is kept so rendered
/// SQL is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    params: Vec<WhereParam>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, param: WhereParam) {
        self.params.push(param);
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WhereParam> {
        self.params.iter()
    }

    /// ` WHERE a = ?1 AND b LIKE ?2`, or an empty string for no predicates.
    pub fn where_sql(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let clauses: Vec<String> = self
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{} {} ?{}", p.field, p.tag.as_sql(), i + 1))
            .collect();
        format!(" WHERE {}", clauses.join(" AND "))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.params.iter().map(|p| &p.prepare)
    }
}

impl FromIterator<WhereParam> for QueryFilter {
    fn from_iter<I: IntoIterator<Item = WhereParam>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

/// Offset/limit window. `limit: None` means every matching row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: Option<u64>,
}

impl Page {
    /// Builds a page from raw request integers: negative offsets clamp to 0
    /// and a non-positive limit is unbounded.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: offset.max(0) as u64,
            limit: (limit > 0).then_some(limit as u64),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    fn limit_sql(&self) -> String {
        match (self.limit, self.offset) {
            (None, 0) => String::new(),
            // SQLite requires a LIMIT before OFFSET; -1 is "no limit".
            (None, offset) => format!(" LIMIT -1 OFFSET {}", offset),
            (Some(limit), offset) => format!(" LIMIT {} OFFSET {}", limit, offset),
        }
    }
}

/// Descending sort on a single column; lists come back newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub field: &'static str,
}

impl Order {
    pub fn desc(field: &'static str) -> Self {
        Self { field }
    }

    fn as_sql(&self) -> String {
        format!(" ORDER BY {} DESC", self.field)
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryParam {
    /// Projected columns; empty selects every column.
    pub fields: &'static [&'static str],
    pub page: Page,
    pub order: Option<Order>,
    pub filter: QueryFilter,
}

impl QueryParam {
    pub fn select_sql(&self, table: &str) -> String {
        let fields = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(", ")
        };
        let order = self.order.map(|o| o.as_sql()).unwrap_or_default();
        format!(
            "SELECT {} FROM {}{}{}{}",
            fields,
            table,
            self.filter.where_sql(),
            order,
            self.page.limit_sql()
        )
    }
}

pub fn count_sql(table: &str, filter: &QueryFilter) -> String {
    format!("SELECT COUNT(*) FROM {}{}", table, filter.where_sql())
}
