use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError};
use crate::key::DocumentKey;
use crate::types::{NewTodoDocument, TodoDocument};

#[derive(Debug, Clone)]
struct StoredTodo {
    title: String,
    completed: Option<bool>,
}

/// In-process document store. Documents come back in insertion order.
///
/// Cloning shares the underlying map, so a clone handed to the service and
/// one kept by a test observe the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: Arc<RwLock<IndexMap<DocumentKey, StoredTodo>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing documents, keeping their keys.
    pub fn with_documents(documents: impl IntoIterator<Item = TodoDocument>) -> Self {
        let docs = documents
            .into_iter()
            .map(|doc| {
                (
                    doc.key,
                    StoredTodo {
                        title: doc.title,
                        completed: doc.completed,
                    },
                )
            })
            .collect();
        Self {
            docs: Arc::new(RwLock::new(docs)),
        }
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

fn document(key: DocumentKey, stored: &StoredTodo) -> TodoDocument {
    TodoDocument {
        key,
        title: stored.title.clone(),
        completed: stored.completed,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<TodoDocument>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs.iter().map(|(key, stored)| document(*key, stored)).collect())
    }

    async fn insert_one(&self, new: NewTodoDocument) -> Result<TodoDocument, StoreError> {
        let key = DocumentKey::generate();
        let stored = StoredTodo {
            title: new.title,
            completed: Some(new.completed),
        };
        let doc = document(key, &stored);
        self.docs.write().await.insert(key, stored);
        Ok(doc)
    }

    async fn find_one_and_update_completed(
        &self,
        key: &DocumentKey,
        completed: bool,
    ) -> Result<Option<TodoDocument>, StoreError> {
        let mut docs = self.docs.write().await;
        Ok(docs.get_mut(key).map(|stored| {
            stored.completed = Some(completed);
            document(*key, stored)
        }))
    }

    async fn delete_one(&self, key: &DocumentKey) -> Result<u64, StoreError> {
        let mut docs = self.docs.write().await;
        Ok(docs.shift_remove(key).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
