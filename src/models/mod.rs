mod content;
mod list_entry;
mod user;

pub use content::{ContentDetails, ContentRef, ContentType, Episode, Genre, Movie, TvShow};
pub use list_entry::{
    EnrichedListEntry, ListEntry, ListPage, PageMeta, Pagination, UserId, DEFAULT_LIMIT,
    DEFAULT_PAGE, MAX_LIMIT,
};
pub use user::{Preferences, User, WatchHistoryItem};
