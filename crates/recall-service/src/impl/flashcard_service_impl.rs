//! Flashcard service implementation.

use crate::background::spawn_reconcile;
use crate::cache::{cache_keys, CacheInterface, CacheService, DEFAULT_TTL};
use crate::dto::{
    CachedRead, CreateFlashcardBatchRequest, CreateFlashcardRequest, UpdateFlashcardRequest,
};
use crate::flashcard_service::FlashcardService;
use async_trait::async_trait;
use recall_core::{
    CategoryId, Flashcard, FlashcardChanges, FlashcardId, NewFlashcard, RecallError, RecallResult,
    UserId, ValidateExt,
};
use recall_repository::FlashcardRepository;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Flashcard service component for DI.
#[derive(Component)]
#[shaku(interface = FlashcardService)]
pub struct FlashcardServiceImpl {
    #[shaku(inject)]
    flashcard_repository: Arc<dyn FlashcardRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = DEFAULT_TTL)]
    cache_ttl: Duration,
}

impl FlashcardServiceImpl {
    /// Creates a flashcard service outside the DI container.
    #[must_use]
    pub fn new(
        flashcard_repository: Arc<dyn FlashcardRepository>,
        cache: Arc<dyn CacheInterface>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            flashcard_repository,
            cache,
            cache_ttl,
        }
    }

    fn cache(&self) -> CacheService {
        CacheService::new(Arc::clone(&self.cache), self.cache_ttl)
    }
}

/// Re-keys a patched snapshot after an update.
///
/// A card moved to another category is written under the new key first and
/// only then removed from the old one, so a concurrent reader never sees it
/// in neither place.
async fn reconcile_update(
    cache: CacheService,
    user_id: UserId,
    category_id: CategoryId,
    id: FlashcardId,
    changes: FlashcardChanges,
) -> RecallResult<()> {
    let old_key = cache_keys::flashcards(&user_id, category_id);
    let mut cached: Flashcard = cache.get_one(&old_key, id).await?;
    cached.apply(&changes);

    match changes.category_id.filter(|target| *target != category_id) {
        None => cache.save_one(&old_key, id, &cached).await,
        Some(target) => {
            let new_key = cache_keys::flashcards(&user_id, target);
            cache.save_one(&new_key, id, &cached).await?;
            cache.delete_field(&old_key, id).await
        }
    }
}

#[async_trait]
impl FlashcardService for FlashcardServiceImpl {
    async fn create_flashcard(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        request: CreateFlashcardRequest,
    ) -> RecallResult<Flashcard> {
        request.validate_request()?;

        let new = NewFlashcard::from(request);
        let id = self
            .flashcard_repository
            .insert(user_id, category_id, &new)
            .await?;
        let flashcard = Flashcard::created(id, user_id.clone(), category_id, new);
        info!(user_id = %user_id, category_id = %category_id, flashcard_id = %id, "Flashcard created");

        let cache = self.cache();
        let key = cache_keys::flashcards(user_id, category_id);
        let snapshot = flashcard.clone();
        spawn_reconcile("flashcard.create", async move {
            cache.save_one(&key, snapshot.id, &snapshot).await
        });

        Ok(flashcard)
    }

    async fn create_flashcards(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        request: CreateFlashcardBatchRequest,
    ) -> RecallResult<u64> {
        request.validate_request()?;

        let cards: Vec<NewFlashcard> = request.flashcards.into_iter().map(Into::into).collect();
        let created = self
            .flashcard_repository
            .insert_many(user_id, category_id, &cards)
            .await?;
        info!(user_id = %user_id, category_id = %category_id, created, "Flashcard batch created");

        // Store-assigned ids are only known after a re-read.
        let cache = self.cache();
        let repository = Arc::clone(&self.flashcard_repository);
        let user_id = user_id.clone();
        spawn_reconcile("flashcard.create_batch", async move {
            let flashcards = repository.find_by_category(&user_id, category_id).await?;
            let key = cache_keys::flashcards(&user_id, category_id);
            cache.save_collection(&key, &flashcards).await
        });

        Ok(created)
    }

    async fn get_flashcards(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
    ) -> RecallResult<CachedRead<Vec<Flashcard>>> {
        let cache = self.cache();
        let key = cache_keys::flashcards(user_id, category_id);

        match cache.get_all::<Flashcard>(&key).await {
            Ok(cached) if !cached.is_empty() => {
                debug!(key = %key, count = cached.len(), "Flashcards served from cache");
                return Ok(CachedRead::hit(cached));
            }
            Ok(_) => debug!(key = %key, "Flashcards not cached"),
            Err(e) => warn!(key = %key, error = %e, "Cache read failed, using store"),
        }

        let flashcards = self
            .flashcard_repository
            .find_by_category(user_id, category_id)
            .await?;

        let snapshot = flashcards.clone();
        spawn_reconcile("flashcard.populate", async move {
            cache.save_collection(&key, &snapshot).await
        });

        Ok(CachedRead::miss(flashcards))
    }

    async fn get_flashcard(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
    ) -> RecallResult<CachedRead<Flashcard>> {
        let cache = self.cache();
        let key = cache_keys::flashcards(user_id, category_id);

        match cache.get_one::<Flashcard>(&key, id).await {
            Ok(cached) => return Ok(CachedRead::hit(cached)),
            Err(e) if e.is_cache_miss() => debug!(key = %key, flashcard_id = %id, "Flashcard not cached"),
            Err(e) => warn!(key = %key, error = %e, "Cache read failed, using store"),
        }

        let flashcard = self
            .flashcard_repository
            .find_by_id(user_id, category_id, id)
            .await?
            .filter(Flashcard::is_existing)
            .ok_or_else(|| RecallError::not_found("Flashcard", id))?;

        let snapshot = flashcard.clone();
        spawn_reconcile("flashcard.populate_one", async move {
            cache.save_one(&key, id, &snapshot).await
        });

        Ok(CachedRead::miss(flashcard))
    }

    async fn update_flashcard(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
        request: UpdateFlashcardRequest,
    ) -> RecallResult<()> {
        request.validate_request()?;

        let changes = FlashcardChanges::from(request);
        if !self
            .flashcard_repository
            .update(user_id, category_id, id, &changes)
            .await?
        {
            return Err(RecallError::not_found("Flashcard", id));
        }
        info!(user_id = %user_id, category_id = %category_id, flashcard_id = %id, "Flashcard updated");

        spawn_reconcile(
            "flashcard.update",
            reconcile_update(self.cache(), user_id.clone(), category_id, id, changes),
        );

        Ok(())
    }

    async fn delete_flashcard(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
    ) -> RecallResult<()> {
        if !self
            .flashcard_repository
            .delete(user_id, category_id, id)
            .await?
        {
            return Err(RecallError::not_found("Flashcard", id));
        }
        info!(user_id = %user_id, category_id = %category_id, flashcard_id = %id, "Flashcard deleted");

        let cache = self.cache();
        let key = cache_keys::flashcards(user_id, category_id);
        spawn_reconcile("flashcard.delete", async move {
            cache.delete_field(&key, id).await
        });

        Ok(())
    }
}

impl std::fmt::Debug for FlashcardServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlashcardServiceImpl")
            .field("cache_ttl", &self.cache_ttl)
            .finish_non_exhaustive()
    }
}
