use crate::{
    error::AppResult,
    models::{ListEntry, Pagination, UserId},
};

/// Persistence for per-user list entries
///
/// Implementations own the (user, content) uniqueness rule: a second insert for
/// the same pair must fail with [`crate::error::AppError::Conflict`], even when
/// both inserts race.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ListStore: Send + Sync {
    async fn insert(&self, entry: &ListEntry) -> AppResult<()>;

    /// Deletes the entry for the pair, returning whether one existed
    async fn delete(&self, user_id: &UserId, content_id: &str) -> AppResult<bool>;

    async fn count(&self, user_id: &UserId) -> AppResult<u64>;

    /// Returns one page of entries, most recently created first
    async fn page(&self, user_id: &UserId, pagination: Pagination) -> AppResult<Vec<ListEntry>>;
}

pub(crate) const DUPLICATE_ENTRY_MESSAGE: &str = "Item is already in My List.";
