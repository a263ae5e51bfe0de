use rusqlite::{OptionalExtension, params_from_iter};

use crate::Database;
use crate::error::PersistenceError;
use crate::models::Entity;
use crate::query::{QueryFilter, QueryParam, Value, count_sql};

impl Database {
    /// Inserts `entity` and writes the store-assigned id back into it.
    pub fn create<T: Entity>(&self, entity: &mut T) -> Result<(), PersistenceError> {
        let placeholders: Vec<String> = (1..=T::COLUMNS.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders.join(", ")
        );
        let values = entity.values();

        let id = self.with_conn(|conn| {
            conn.execute(&sql, params_from_iter(values.iter()))?;
            Ok(conn.last_insert_rowid())
        })?;

        entity.set_id(id);
        Ok(())
    }

    /// Overwrites every writable column of record `id`.
    pub fn update<T: Entity>(&self, id: i64, entity: &T) -> Result<(), PersistenceError> {
        let assignments: Vec<String> = T::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{} = ?{}", col, i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            T::TABLE,
            assignments.join(", "),
            T::COLUMNS.len() + 1
        );
        let mut values = entity.values();
        values.push(Value::Int(id));

        // SQLite counts matched rows, so rewriting identical values still reports 1.
        let changed = self.with_conn(|conn| Ok(conn.execute(&sql, params_from_iter(values.iter()))?))?;
        if changed == 0 {
            return Err(PersistenceError::NotFound { table: T::TABLE, id });
        }
        Ok(())
    }

    pub fn get<T: Entity>(&self, id: i64) -> Result<Option<T>, PersistenceError> {
        let sql = format!(
            "SELECT id, {} FROM {} WHERE id = ?1",
            T::COLUMNS.join(", "),
            T::TABLE
        );
        self.with_conn(|conn| Ok(conn.query_row(&sql, [id], |row| T::from_row(row)).optional()?))
    }

    /// Returns the number of rows removed.
    pub fn delete<T: Entity>(&self, id: i64) -> Result<usize, PersistenceError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", T::TABLE);
        self.with_conn(|conn| Ok(conn.execute(&sql, [id])?))
    }

    pub fn list<T: Entity>(&self, query: &QueryParam) -> Result<Vec<T>, PersistenceError> {
        let sql = query.select_sql(T::TABLE);
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(query.filter.values()), |row| T::from_row(row))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Counts matching rows, ignoring any page window.
    pub fn total<T: Entity>(&self, filter: &QueryFilter) -> Result<u64, PersistenceError> {
        let sql = count_sql(T::TABLE, filter);
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(&sql, params_from_iter(filter.values()), |row| row.get(0))?;
            Ok(count as u64)
        })
    }
}
