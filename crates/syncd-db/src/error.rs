use thiserror::Error;

/// Failure reported by the model layer. Callers above the store treat every
/// variant as an opaque application error; the variants exist for logging.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("{table} record {id} not found")]
    NotFound { table: &'static str, id: i64 },

    #[error("database lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("blocking store task failed: {0}")]
    Blocking(String),
}

impl PersistenceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
