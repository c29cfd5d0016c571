use std::path::Path;

use rusqlite::Connection;

use crate::store::{StoreError, StoreResult};

pub const MEMORY_URL: &str = ":memory:";

pub fn initialize(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch("PRAGMA journal_mode=WAL;").ok();

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            collection TEXT NOT NULL,
            body TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, seq);
        ",
    )?;
    Ok(())
}

/// Opens a connection for a connection string: `:memory:`, a file path, or
/// `sqlite://<path>`. Parent directories of file paths are created.
pub fn open(url: &str) -> StoreResult<Connection> {
    let url = url.trim();
    let conn = if url == MEMORY_URL || url == "sqlite::memory:" {
        Connection::open_in_memory()?
    } else {
        let path = url.strip_prefix("sqlite://").unwrap_or(url);
        if path.is_empty() {
            return Err(StoreError::InvalidUrl(url.to_string()));
        }
        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::InvalidUrl(format!("{url}: {e}")))?;
        }
        Connection::open(path)?
    };
    initialize(&conn)?;
    Ok(conn)
}
