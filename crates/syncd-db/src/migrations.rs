use rusqlite::Connection;
use tracing::info;

use crate::error::PersistenceError;

pub fn run(conn: &Connection) -> Result<(), PersistenceError> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (server inventory)");
        // No REFERENCES on server.group_id: deleting a group leaves its servers.
        conn.execute_batch(
            "
            CREATE TABLE server_group (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                name    TEXT NOT NULL DEFAULT ''
            );

            CREATE TABLE server (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                group_id    INTEGER NOT NULL DEFAULT 0,
                name        TEXT NOT NULL DEFAULT '',
                ip          TEXT NOT NULL DEFAULT '',
                ssh_port    INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX idx_server_group_id ON server(group_id);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
