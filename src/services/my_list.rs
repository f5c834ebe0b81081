use std::sync::Arc;

use crate::{
    db::{Catalog, ListStore},
    error::{AppError, AppResult},
    models::{ContentRef, EnrichedListEntry, ListEntry, ListPage, PageMeta, Pagination, UserId},
};

/// Add, remove and list operations over a user's list
#[derive(Clone)]
pub struct ListService {
    catalog: Catalog,
    entries: Arc<dyn ListStore>,
}

impl ListService {
    pub fn new(catalog: Catalog, entries: Arc<dyn ListStore>) -> Self {
        Self { catalog, entries }
    }

    /// Adds a catalog item to the user's list
    ///
    /// Fails with `NotFound` when the item is not in the catalog table named by its
    /// tag and with `Conflict` when the user already has it.
    pub async fn add(&self, user_id: &UserId, content: ContentRef) -> AppResult<ListEntry> {
        if !self.catalog.contains(&content).await? {
            return Err(AppError::NotFound(format!("{} not found.", content)));
        }

        let entry = ListEntry::new(user_id, &content);
        self.entries.insert(&entry).await?;

        tracing::info!(
            user_id = %user_id,
            content_id = %entry.content_id,
            content_type = %entry.content_type,
            list_id = %entry.id,
            "Added item to list"
        );

        Ok(entry)
    }

    pub async fn remove(&self, user_id: &UserId, content_id: &str) -> AppResult<()> {
        if !self.entries.delete(user_id, content_id).await? {
            return Err(AppError::NotFound("Item not found in My List.".to_string()));
        }

        tracing::info!(user_id = %user_id, content_id = %content_id, "Removed item from list");
        Ok(())
    }

    /// Returns one page of the list, newest first, with catalog details attached
    ///
    /// Entries whose catalog record has since disappeared are kept with
    /// `content_details` set to `None`.
    pub async fn list(&self, user_id: &UserId, pagination: Pagination) -> AppResult<ListPage> {
        let total = self.entries.count(user_id).await?;
        let entries = self.entries.page(user_id, pagination).await?;

        let refs: Vec<ContentRef> = entries.iter().map(ListEntry::content_ref).collect();
        let mut details = self.catalog.resolve(&refs).await?;

        let data = entries
            .into_iter()
            .zip(refs)
            .map(|(entry, content)| {
                let content_details = details.remove(&content);
                if content_details.is_none() {
                    tracing::warn!(
                        list_id = %entry.id,
                        content = %content,
                        "List entry references missing catalog record"
                    );
                }
                EnrichedListEntry::new(entry, content_details)
            })
            .collect();

        Ok(ListPage {
            data,
            meta: PageMeta::new(total, pagination),
        })
    }
}
