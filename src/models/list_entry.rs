use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

use super::{ContentDetails, ContentRef, ContentType};

/// Opaque identity of the user owning a list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One user's inclusion of one catalog item in their list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    pub id: Uuid,
    pub user_id: String,
    pub content_id: String,
    pub content_type: ContentType,
    pub created_at: DateTime<Utc>,
}

impl ListEntry {
    /// Creates a fresh entry stamped with the current time
    pub fn new(user_id: &UserId, content: &ContentRef) -> Self {
        Self::with_created_at(user_id, content, Utc::now())
    }

    pub fn with_created_at(user_id: &UserId, content: &ContentRef, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.as_str().to_string(),
            content_id: content.id().to_string(),
            content_type: content.content_type(),
            created_at,
        }
    }

    pub fn content_ref(&self) -> ContentRef {
        ContentRef::new(self.content_type, self.content_id.clone())
    }
}

/// List entry joined with its catalog record
///
/// `content_details` is `None` when the referenced record no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedListEntry {
    pub list_id: Uuid,
    pub content_id: String,
    pub content_type: ContentType,
    pub created_at: DateTime<Utc>,
    pub content_details: Option<ContentDetails>,
}

impl EnrichedListEntry {
    pub fn new(entry: ListEntry, content_details: Option<ContentDetails>) -> Self {
        Self {
            list_id: entry.id,
            content_id: entry.content_id,
            content_type: entry.content_type,
            created_at: entry.created_at,
            content_details,
        }
    }
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// Validated page window over a user's list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Builds a window, rejecting a page below 1 or a limit outside 1..=100
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, String> {
        let page = match page {
            None => DEFAULT_PAGE,
            Some(p) if p >= 1 && p <= u32::MAX as i64 => p as u32,
            Some(_) => return Err("\"page\" must be greater than or equal to 1".to_string()),
        };

        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(l) if l < 1 => {
                return Err("\"limit\" must be greater than or equal to 1".to_string())
            }
            Some(l) if l > MAX_LIMIT as i64 => {
                return Err(format!("\"limit\" must be less than or equal to {}", MAX_LIMIT))
            }
            Some(l) => l as u32,
        };

        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of entries skipped before this page
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(total: u64, pagination: Pagination) -> Self {
        Self {
            total,
            page: pagination.page(),
            limit: pagination.limit(),
            total_pages: pagination.total_pages(total),
        }
    }
}

/// One page of a user's list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage {
    pub data: Vec<EnrichedListEntry>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let p = Pagination::new(None, None).unwrap();
        assert_eq!(p, Pagination::default());
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 20);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_pagination_bounds() {
        assert!(Pagination::new(Some(0), None).is_err());
        assert!(Pagination::new(Some(-3), None).is_err());
        assert!(Pagination::new(None, Some(0)).is_err());
        assert!(Pagination::new(None, Some(101)).is_err());
        assert!(Pagination::new(Some(1), Some(100)).is_ok());
        assert!(Pagination::new(Some(1), Some(1)).is_ok());
    }

    #[test]
    fn test_pagination_error_names_field() {
        let err = Pagination::new(None, Some(500)).unwrap_err();
        assert!(err.contains("\"limit\""));
        let err = Pagination::new(Some(0), None).unwrap_err();
        assert!(err.contains("\"page\""));
    }

    #[test]
    fn test_offset_and_total_pages() {
        let p = Pagination::new(Some(3), Some(10)).unwrap();
        assert_eq!(p.offset(), 20);
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(1), 1);
        assert_eq!(p.total_pages(10), 1);
        assert_eq!(p.total_pages(11), 2);
        assert_eq!(p.total_pages(25), 3);
    }

    #[test]
    fn test_list_entry_from_content_ref() {
        let user = UserId::new("user-1");
        let content = ContentRef::new(ContentType::Movie, "movie-101");
        let entry = ListEntry::new(&user, &content);
        assert_eq!(entry.user_id, "user-1");
        assert_eq!(entry.content_id, "movie-101");
        assert_eq!(entry.content_type, ContentType::Movie);
        assert_eq!(entry.content_ref(), content);
    }

    #[test]
    fn test_enriched_entry_serializes_null_details() {
        let entry = ListEntry::new(
            &UserId::new("user-1"),
            &ContentRef::new(ContentType::TvShow, "tvshow-9"),
        );
        let id = entry.id;
        let json = serde_json::to_value(EnrichedListEntry::new(entry, None)).unwrap();
        assert_eq!(json["listId"], id.to_string());
        assert_eq!(json["contentType"], "TVShow");
        assert!(json["contentDetails"].is_null());
    }
}
