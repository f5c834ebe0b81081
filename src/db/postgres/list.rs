use sqlx::PgPool;

use crate::{
    db::{list_store::DUPLICATE_ENTRY_MESSAGE, ListStore},
    error::{AppError, AppResult},
    models::{ListEntry, Pagination, UserId},
};

/// List entries backed by the `mylists` table
///
/// Uniqueness of (user_id, content_id) comes from the table's unique constraint,
/// so concurrent inserts of the same pair are settled by PostgreSQL.
#[derive(Clone)]
pub struct PgListStore {
    pool: PgPool,
}

impl PgListStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ListStore for PgListStore {
    async fn insert(&self, entry: &ListEntry) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO mylists (id, user_id, content_id, content_type, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.user_id)
        .bind(&entry.content_id)
        .bind(entry.content_type)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::Conflict(DUPLICATE_ENTRY_MESSAGE.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, user_id: &UserId, content_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM mylists WHERE user_id = $1 AND content_id = $2")
            .bind(user_id.as_str())
            .bind(content_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, user_id: &UserId) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mylists WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(total.max(0) as u64)
    }

    async fn page(&self, user_id: &UserId, pagination: Pagination) -> AppResult<Vec<ListEntry>> {
        let entries = sqlx::query_as::<_, ListEntry>(
            r#"
            SELECT id, user_id, content_id, content_type, created_at
            FROM mylists
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id.as_str())
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
