use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{
    db::{list_store::DUPLICATE_ENTRY_MESSAGE, CatalogAccessor, ListStore},
    error::{AppError, AppResult},
    models::{ContentDetails, ListEntry, Pagination, UserId},
};

/// In-process catalog table, used by tests and local runs without PostgreSQL
#[derive(Default)]
pub struct InMemoryCatalog {
    items: RwLock<HashMap<String, ContentDetails>>,
}

impl InMemoryCatalog {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ContentDetails>,
    {
        let items = items
            .into_iter()
            .map(Into::into)
            .map(|details: ContentDetails| (details.content_ref().id().to_string(), details))
            .collect();
        Self {
            items: RwLock::new(items),
        }
    }

    pub async fn insert(&self, details: impl Into<ContentDetails>) {
        let details = details.into();
        let id = details.content_ref().id().to_string();
        self.items.write().await.insert(id, details);
    }

    pub async fn remove(&self, id: &str) -> Option<ContentDetails> {
        self.items.write().await.remove(id)
    }
}

#[async_trait::async_trait]
impl CatalogAccessor for InMemoryCatalog {
    async fn exists(&self, id: &str) -> AppResult<bool> {
        Ok(self.items.read().await.contains_key(id))
    }

    async fn fetch_many(&self, ids: &[String]) -> AppResult<Vec<ContentDetails>> {
        let items = self.items.read().await;
        Ok(ids.iter().filter_map(|id| items.get(id).cloned()).collect())
    }
}

/// In-process list store; entries are kept in insertion order
#[derive(Default)]
pub struct InMemoryListStore {
    entries: RwLock<Vec<ListEntry>>,
}

impl InMemoryListStore {
    pub fn new(entries: Vec<ListEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ListStore for InMemoryListStore {
    async fn insert(&self, entry: &ListEntry) -> AppResult<()> {
        // Check and insert under one write guard so racing inserts serialize
        let mut entries = self.entries.write().await;
        let duplicate = entries
            .iter()
            .any(|e| e.user_id == entry.user_id && e.content_id == entry.content_id);
        if duplicate {
            return Err(AppError::Conflict(DUPLICATE_ENTRY_MESSAGE.to_string()));
        }
        entries.push(entry.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &UserId, content_id: &str) -> AppResult<bool> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| !(e.user_id == user_id.as_str() && e.content_id == content_id));
        Ok(entries.len() < before)
    }

    async fn count(&self, user_id: &UserId) -> AppResult<u64> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| e.user_id == user_id.as_str())
            .count() as u64)
    }

    async fn page(&self, user_id: &UserId, pagination: Pagination) -> AppResult<Vec<ListEntry>> {
        let entries = self.entries.read().await;
        let mut matching: Vec<&ListEntry> = entries
            .iter()
            .filter(|e| e.user_id == user_id.as_str())
            .collect();
        // Stable sort keeps insertion order for equal timestamps
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .cloned()
            .collect())
    }
}
