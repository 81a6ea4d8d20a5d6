//! MySQL flashcard repository implementation.

use super::category_repository::to_store_id;
use crate::{traits::FlashcardRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use recall_core::{
    CategoryId, Flashcard, FlashcardChanges, FlashcardId, NewFlashcard, RecallError, RecallResult,
    UserId,
};
use shaku::Component;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::sync::Arc;
use tracing::debug;

/// MySQL flashcard repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = FlashcardRepository)]
pub struct MySqlFlashcardRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlFlashcardRepository {
    /// Creates a new MySQL flashcard repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FlashcardRow {
    id: i64,
    name: String,
    content: String,
    category_id: i64,
    user_id: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<FlashcardRow> for Flashcard {
    type Error = RecallError;

    fn try_from(row: FlashcardRow) -> Result<Self, Self::Error> {
        Ok(Flashcard {
            id: FlashcardId::new(row.id),
            name: row.name,
            content: row.content,
            category_id: CategoryId::new(row.category_id),
            owner_id: UserId::parse(&row.user_id)
                .map_err(|e| RecallError::Internal(format!("Invalid user_id in database: {e}")))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, name, content, category_id, user_id, created_at, updated_at FROM flashcard";

#[async_trait]
impl FlashcardRepository for MySqlFlashcardRepository {
    async fn insert(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        flashcard: &NewFlashcard,
    ) -> RecallResult<FlashcardId> {
        debug!(user_id = %user_id, category_id = %category_id, "Inserting flashcard");

        let result = sqlx::query(
            "INSERT INTO flashcard (name, content, category_id, user_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&flashcard.name)
        .bind(&flashcard.content)
        .bind(category_id.value())
        .bind(user_id.as_str())
        .execute(self.pool.inner())
        .await?;

        to_store_id(result.last_insert_id()).map(FlashcardId::new)
    }

    async fn insert_many(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        flashcards: &[NewFlashcard],
    ) -> RecallResult<u64> {
        if flashcards.is_empty() {
            return Ok(0);
        }
        debug!(
            user_id = %user_id,
            category_id = %category_id,
            count = flashcards.len(),
            "Inserting flashcard batch"
        );

        let mut builder: QueryBuilder<'_, MySql> =
            QueryBuilder::new("INSERT INTO flashcard (name, content, category_id, user_id) ");
        builder.push_values(flashcards, |mut row, card| {
            row.push_bind(&card.name)
                .push_bind(&card.content)
                .push_bind(category_id.value())
                .push_bind(user_id.as_str());
        });

        let result = builder.build().execute(self.pool.inner()).await?;
        Ok(result.rows_affected())
    }

    async fn find_by_category(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
    ) -> RecallResult<Vec<Flashcard>> {
        debug!(user_id = %user_id, category_id = %category_id, "Finding flashcards");

        let rows = sqlx::query_as::<_, FlashcardRow>(&format!(
            "{SELECT_COLUMNS} WHERE user_id = ? AND category_id = ? ORDER BY id"
        ))
        .bind(user_id.as_str())
        .bind(category_id.value())
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Flashcard::try_from).collect()
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
    ) -> RecallResult<Option<Flashcard>> {
        debug!(user_id = %user_id, flashcard_id = %id, "Finding flashcard by id");

        let row = sqlx::query_as::<_, FlashcardRow>(&format!(
            "{SELECT_COLUMNS} WHERE user_id = ? AND category_id = ? AND id = ?"
        ))
        .bind(user_id.as_str())
        .bind(category_id.value())
        .bind(id.value())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Flashcard::try_from).transpose()
    }

    async fn update(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
        changes: &FlashcardChanges,
    ) -> RecallResult<bool> {
        debug!(user_id = %user_id, flashcard_id = %id, "Updating flashcard");

        let target = changes.category_id.unwrap_or(category_id);
        let result = sqlx::query(
            r#"
            UPDATE flashcard
            SET name = ?, content = ?, category_id = ?, updated_at = CURRENT_TIMESTAMP(6)
            WHERE user_id = ? AND category_id = ? AND id = ?
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.content)
        .bind(target.value())
        .bind(user_id.as_str())
        .bind(category_id.value())
        .bind(id.value())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
    ) -> RecallResult<bool> {
        debug!(user_id = %user_id, flashcard_id = %id, "Deleting flashcard");

        let result =
            sqlx::query("DELETE FROM flashcard WHERE user_id = ? AND category_id = ? AND id = ?")
                .bind(user_id.as_str())
                .bind(category_id.value())
                .bind(id.value())
                .execute(self.pool.inner())
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
