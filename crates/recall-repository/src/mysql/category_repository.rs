//! MySQL category repository implementation.

use crate::{traits::CategoryRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use recall_core::{Category, CategoryId, RecallError, RecallResult, UserId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL category repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = CategoryRepository)]
pub struct MySqlCategoryRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlCategoryRepository {
    /// Creates a new MySQL category repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    user_id: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = RecallError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: CategoryId::new(row.id),
            name: row.name,
            owner_id: UserId::parse(&row.user_id)
                .map_err(|e| RecallError::Internal(format!("Invalid user_id in database: {e}")))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub(crate) fn to_store_id(raw: u64) -> RecallResult<i64> {
    i64::try_from(raw).map_err(|_| RecallError::Internal(format!("Insert id out of range: {raw}")))
}

#[async_trait]
impl CategoryRepository for MySqlCategoryRepository {
    async fn insert(&self, user_id: &UserId, name: &str) -> RecallResult<CategoryId> {
        debug!(user_id = %user_id, "Inserting category");

        let result = sqlx::query("INSERT INTO flash_category (name, user_id) VALUES (?, ?)")
            .bind(name)
            .bind(user_id.as_str())
            .execute(self.pool.inner())
            .await?;

        to_store_id(result.last_insert_id()).map(CategoryId::new)
    }

    async fn find_all(&self, user_id: &UserId) -> RecallResult<Vec<Category>> {
        debug!(user_id = %user_id, "Finding categories");

        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, user_id, created_at, updated_at
            FROM flash_category
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Category::try_from).collect()
    }

    async fn update(&self, user_id: &UserId, id: CategoryId, name: &str) -> RecallResult<bool> {
        debug!(user_id = %user_id, category_id = %id, "Updating category");

        let result = sqlx::query(
            r#"
            UPDATE flash_category
            SET name = ?, updated_at = CURRENT_TIMESTAMP(6)
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(name)
        .bind(user_id.as_str())
        .bind(id.value())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, user_id: &UserId, id: CategoryId) -> RecallResult<bool> {
        debug!(user_id = %user_id, category_id = %id, "Deleting category");

        let result = sqlx::query("DELETE FROM flash_category WHERE user_id = ? AND id = ?")
            .bind(user_id.as_str())
            .bind(id.value())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
