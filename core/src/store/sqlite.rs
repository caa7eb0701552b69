use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::{DocumentStore, StoreError};
use crate::key::DocumentKey;
use crate::types::{NewTodoDocument, TodoDocument};

/// SQLite-backed document store.
///
/// One connection is shared behind a mutex; each call runs on the blocking
/// pool so the async runtime never waits on disk I/O. Retrieval order is
/// rowid order, which is insertion order.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

type RawRow = (Vec<u8>, String, Option<bool>);

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.busy_timeout(busy_timeout)?;
        debug!(path = %path.display(), "opened sqlite store");
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;

            CREATE TABLE IF NOT EXISTS todos (
              key BLOB PRIMARY KEY,
              title TEXT NOT NULL,
              completed INTEGER
            );
            "#,
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::Unavailable)?;
            f(&conn)
        })
        .await?
    }
}

fn read_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn into_document((key, title, completed): RawRow) -> Result<TodoDocument, StoreError> {
    let key = DocumentKey::try_from(key.as_slice())
        .map_err(|len| StoreError::Corrupt(format!("key is {len} bytes")))?;
    Ok(TodoDocument {
        key,
        title,
        completed,
    })
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn find_all(&self) -> Result<Vec<TodoDocument>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT key, title, completed FROM todos ORDER BY rowid")?;
            let rows = stmt.query_map([], read_raw)?;
            let docs = rows
                .map(|row| into_document(row?))
                .collect::<Result<Vec<_>, StoreError>>();
            docs
        })
        .await
    }

    async fn insert_one(&self, new: NewTodoDocument) -> Result<TodoDocument, StoreError> {
        self.with_conn(move |conn| {
            let key = DocumentKey::generate();
            conn.execute(
                "INSERT INTO todos (key, title, completed) VALUES (?1, ?2, ?3)",
                params![key.as_bytes().as_slice(), new.title, new.completed],
            )?;
            Ok(TodoDocument {
                key,
                title: new.title,
                completed: Some(new.completed),
            })
        })
        .await
    }

    async fn find_one_and_update_completed(
        &self,
        key: &DocumentKey,
        completed: bool,
    ) -> Result<Option<TodoDocument>, StoreError> {
        let key = *key;
        self.with_conn(move |conn| {
            let raw = conn
                .query_row(
                    "UPDATE todos SET completed = ?1 WHERE key = ?2 \
                     RETURNING key, title, completed",
                    params![completed, key.as_bytes().as_slice()],
                    read_raw,
                )
                .optional()?;
            raw.map(into_document).transpose()
        })
        .await
    }

    async fn delete_one(&self, key: &DocumentKey) -> Result<u64, StoreError> {
        let key = *key;
        self.with_conn(move |conn| {
            let deleted = conn.execute(
                "DELETE FROM todos WHERE key = ?1",
                params![key.as_bytes().as_slice()],
            )?;
            Ok(deleted as u64)
        })
        .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |_| Ok(()))?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_doc(title: &str) -> NewTodoDocument {
        NewTodoDocument {
            title: title.to_string(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn documents_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");

        let store = SqliteStore::open(&path, Duration::from_secs(1)).unwrap();
        let doc = store.insert_one(new_doc("persisted")).await.unwrap();
        store
            .find_one_and_update_completed(&doc.key, true)
            .await
            .unwrap();
        drop(store);

        let reopened = SqliteStore::open(&path, Duration::from_secs(1)).unwrap();
        let docs = reopened.find_all().await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].key, doc.key);
        assert_eq!(docs[0].title, "persisted");
        assert_eq!(docs[0].completed, Some(true));
    }

    #[tokio::test]
    async fn find_all_returns_insertion_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.insert_one(new_doc("a")).await.unwrap();
        let b = store.insert_one(new_doc("b")).await.unwrap();
        let keys: Vec<_> = store.find_all().await.unwrap().into_iter().map(|d| d.key).collect();
        assert_eq!(keys, vec![a.key, b.key]);
    }

    #[tokio::test]
    async fn update_returns_post_update_document_or_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        let doc = store.insert_one(new_doc("a")).await.unwrap();

        let updated = store
            .find_one_and_update_completed(&doc.key, true)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.completed, Some(true));

        let missing = store
            .find_one_and_update_completed(&DocumentKey::generate(), true)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn delete_counts_removed_rows() {
        let store = SqliteStore::open_in_memory().unwrap();
        let doc = store.insert_one(new_doc("a")).await.unwrap();
        assert_eq!(store.delete_one(&doc.key).await.unwrap(), 1);
        assert_eq!(store.delete_one(&doc.key).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn null_completed_reads_as_absent() {
        let store = SqliteStore::open_in_memory().unwrap();
        let key = DocumentKey::generate();
        store
            .with_conn(move |conn| {
                conn.execute(
                    "INSERT INTO todos (key, title, completed) VALUES (?1, 'legacy', NULL)",
                    params![key.as_bytes().as_slice()],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let docs = store.find_all().await.unwrap();
        assert_eq!(docs[0].completed, None);
    }

    #[tokio::test]
    async fn short_key_blob_is_corrupt() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO todos (key, title, completed) VALUES (x'0102', 'bad', 0)",
                    [],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let err = store.find_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn ping_succeeds_on_open_store() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.ping().await.unwrap();
    }
}
