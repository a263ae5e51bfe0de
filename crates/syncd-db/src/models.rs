//! Database row types and their table mapping.
//! Distinct from syncd-types API models to keep the DB layer independent.

use rusqlite::Row;
use rusqlite::types::FromSql;

use crate::query::Value;

/// A table-backed record with an integer `id` primary key.
pub trait Entity: Sized + Send + 'static {
    const TABLE: &'static str;
    /// Writable columns (everything but `id`), in the order `values` yields them.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn values(&self) -> Vec<Value>;

    /// Decodes a row by column name. Columns left out of a projection decode
    /// to their default.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

fn column<T: FromSql + Default>(row: &Row<'_>, name: &str) -> rusqlite::Result<T> {
    match row.get(name) {
        Ok(v) => Ok(v),
        Err(rusqlite::Error::InvalidColumnName(_)) => Ok(T::default()),
        Err(e) => Err(e),
    }
}

// -- Server groups --

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerGroupRow {
    pub id: i64,
    pub name: String,
}

impl Entity for ServerGroupRow {
    const TABLE: &'static str = "server_group";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn values(&self) -> Vec<Value> {
        vec![Value::from(self.name.as_str())]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: column(row, "id")?,
            name: column(row, "name")?,
        })
    }
}

impl From<ServerGroupRow> for syncd_types::models::ServerGroup {
    fn from(row: ServerGroupRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

// -- Servers --

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerRow {
    pub id: i64,
    pub group_id: i64,
    pub name: String,
    pub ip: String,
    pub ssh_port: i64,
}

impl Entity for ServerRow {
    const TABLE: &'static str = "server";
    const COLUMNS: &'static [&'static str] = &["group_id", "name", "ip", "ssh_port"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Int(self.group_id),
            Value::from(self.name.as_str()),
            Value::from(self.ip.as_str()),
            Value::Int(self.ssh_port),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: column(row, "id")?,
            group_id: column(row, "group_id")?,
            name: column(row, "name")?,
            ip: column(row, "ip")?,
            ssh_port: column(row, "ssh_port")?,
        })
    }
}

impl From<ServerRow> for syncd_types::models::Server {
    fn from(row: ServerRow) -> Self {
        Self {
            id: row.id,
            group_id: row.group_id,
            name: row.name,
            ip: row.ip,
            ssh_port: row.ssh_port,
        }
    }
}
