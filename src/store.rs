//! JSON document collections persisted in SQLite.
//!
//! Every document lives in the shared `documents` table, tagged with the
//! name of its collection. The store assigns each document an id and a
//! creation timestamp on insert; neither changes afterwards.

use std::fmt;
use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid timestamp in stored document: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("invalid connection string '{0}'")]
    InvalidUrl(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-assigned document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored value together with the fields the store owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<T> {
    pub id: DocumentId,
    pub created: DateTime<Utc>,
    pub body: T,
}

/// Process-wide handle to the document database.
pub struct DocumentStore {
    conn: Mutex<Connection>,
}

impl DocumentStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn: Mutex::new(conn) }
    }

    pub fn open(url: &str) -> StoreResult<Self> {
        let conn = crate::db::open(url)?;
        log::info!("event=store_open status=ok url={url}");
        Ok(Self::new(conn))
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open(crate::db::MEMORY_URL)
    }

    /// Locks the connection, recovering from a poisoned mutex.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn collection<T>(&self, name: &'static str) -> Collection<'_, T> {
        Collection {
            store: self,
            name,
            _marker: PhantomData,
        }
    }

    /// Removes every document from every collection.
    pub fn drop_database(&self) -> StoreResult<usize> {
        let removed = self.conn().execute("DELETE FROM documents", [])?;
        log::warn!("event=drop_database removed={removed}");
        Ok(removed)
    }
}

/// Typed view over one named collection.
pub struct Collection<'s, T> {
    store: &'s DocumentStore,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

const INSERT_SQL: &str =
    "INSERT INTO documents (id, collection, body, created_at) VALUES (?1, ?2, ?3, ?4)";

fn read_document<T: DeserializeOwned>(
    id: String,
    body: String,
    created_at: String,
) -> StoreResult<Document<T>> {
    Ok(Document {
        id: DocumentId(id),
        created: DateTime::parse_from_rfc3339(&created_at)?.with_timezone(&Utc),
        body: serde_json::from_str(&body)?,
    })
}

impl<T: Serialize + DeserializeOwned> Collection<'_, T> {
    pub fn insert_one(&self, body: T) -> StoreResult<Document<T>> {
        let doc = Document {
            id: DocumentId::generate(),
            created: Utc::now(),
            body,
        };
        self.store.conn().execute(
            INSERT_SQL,
            params![
                doc.id.as_str(),
                self.name,
                serde_json::to_string(&doc.body)?,
                doc.created.to_rfc3339(),
            ],
        )?;
        Ok(doc)
    }

    /// Inserts all values in order inside one transaction; on any failure
    /// nothing is stored.
    pub fn insert_many<I>(&self, bodies: I) -> StoreResult<Vec<Document<T>>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut conn = self.store.conn();
        let tx = conn.transaction()?;
        let mut inserted = Vec::new();
        {
            let mut stmt = tx.prepare(INSERT_SQL)?;
            for body in bodies {
                let doc = Document {
                    id: DocumentId::generate(),
                    created: Utc::now(),
                    body,
                };
                stmt.execute(params![
                    doc.id.as_str(),
                    self.name,
                    serde_json::to_string(&doc.body)?,
                    doc.created.to_rfc3339(),
                ])?;
                inserted.push(doc);
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// All documents in insertion order.
    pub fn find_all(&self) -> StoreResult<Vec<Document<T>>> {
        let conn = self.store.conn();
        let mut stmt = conn.prepare(
            "SELECT id, body, created_at FROM documents WHERE collection = ?1 ORDER BY seq",
        )?;
        let rows = stmt
            .query_map([self.name], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, body, created_at)| read_document(id, body, created_at))
            .collect()
    }

    pub fn find_by_id(&self, id: &str) -> StoreResult<Option<Document<T>>> {
        let row = self
            .store
            .conn()
            .query_row(
                "SELECT id, body, created_at FROM documents WHERE collection = ?1 AND id = ?2",
                params![self.name, id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)),
            )
            .optional()?;

        row.map(|(id, body, created_at)| read_document(id, body, created_at))
            .transpose()
    }

    pub fn count(&self) -> StoreResult<u64> {
        let n: i64 = self.store.conn().query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            [self.name],
            |r| r.get(0),
        )?;
        Ok(n as u64)
    }

    /// Replaces the body of an existing document. Returns `None` when no
    /// document has this id.
    pub fn replace_one(&self, id: &str, body: T) -> StoreResult<Option<Document<T>>> {
        let updated = self.store.conn().execute(
            "UPDATE documents SET body = ?1 WHERE collection = ?2 AND id = ?3",
            params![serde_json::to_string(&body)?, self.name, id],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        self.find_by_id(id)
    }

    pub fn delete_one(&self, id: &str) -> StoreResult<bool> {
        let deleted = self.store.conn().execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![self.name, id],
        )?;
        Ok(deleted > 0)
    }
}
