//! Category service implementation.

use crate::background::spawn_reconcile;
use crate::cache::{cache_keys, CacheInterface, CacheService, DEFAULT_TTL};
use crate::category_service::CategoryService;
use crate::dto::{CachedRead, CreateCategoryRequest, UpdateCategoryRequest};
use async_trait::async_trait;
use recall_core::{Category, CategoryId, RecallError, RecallResult, UserId, ValidateExt};
use recall_repository::CategoryRepository;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Category service component for DI.
#[derive(Component)]
#[shaku(interface = CategoryService)]
pub struct CategoryServiceImpl {
    #[shaku(inject)]
    category_repository: Arc<dyn CategoryRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = DEFAULT_TTL)]
    cache_ttl: Duration,
}

impl CategoryServiceImpl {
    /// Creates a category service outside the DI container.
    #[must_use]
    pub fn new(
        category_repository: Arc<dyn CategoryRepository>,
        cache: Arc<dyn CacheInterface>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            category_repository,
            cache,
            cache_ttl,
        }
    }

    fn cache(&self) -> CacheService {
        CacheService::new(Arc::clone(&self.cache), self.cache_ttl)
    }
}

#[async_trait]
impl CategoryService for CategoryServiceImpl {
    async fn create_category(
        &self,
        user_id: &UserId,
        request: CreateCategoryRequest,
    ) -> RecallResult<Category> {
        request.validate_request()?;

        let id = self.category_repository.insert(user_id, &request.name).await?;
        let category = Category::created(id, user_id.clone(), request.name);
        info!(user_id = %user_id, category_id = %id, "Category created");

        let cache = self.cache();
        let key = cache_keys::categories(user_id);
        let snapshot = category.clone();
        spawn_reconcile("category.create", async move {
            cache.save_one(&key, snapshot.id, &snapshot).await
        });

        Ok(category)
    }

    async fn get_categories(&self, user_id: &UserId) -> RecallResult<CachedRead<Vec<Category>>> {
        let cache = self.cache();
        let key = cache_keys::categories(user_id);

        match cache.get_all::<Category>(&key).await {
            Ok(cached) if !cached.is_empty() => {
                debug!(key = %key, count = cached.len(), "Categories served from cache");
                return Ok(CachedRead::hit(cached));
            }
            Ok(_) => debug!(key = %key, "Categories not cached"),
            Err(e) => warn!(key = %key, error = %e, "Cache read failed, using store"),
        }

        let categories = self.category_repository.find_all(user_id).await?;

        let snapshot = categories.clone();
        spawn_reconcile("category.populate", async move {
            cache.save_collection(&key, &snapshot).await
        });

        Ok(CachedRead::miss(categories))
    }

    async fn update_category(
        &self,
        user_id: &UserId,
        id: CategoryId,
        request: UpdateCategoryRequest,
    ) -> RecallResult<()> {
        request.validate_request()?;

        if !self
            .category_repository
            .update(user_id, id, &request.name)
            .await?
        {
            return Err(RecallError::not_found("Category", id));
        }
        info!(user_id = %user_id, category_id = %id, "Category updated");

        let cache = self.cache();
        let key = cache_keys::categories(user_id);
        let name = request.name;
        spawn_reconcile("category.update", async move {
            let mut cached: Category = cache.get_one(&key, id).await?;
            cached.rename(name);
            cache.save_one(&key, id, &cached).await
        });

        Ok(())
    }

    async fn delete_category(&self, user_id: &UserId, id: CategoryId) -> RecallResult<()> {
        if !self.category_repository.delete(user_id, id).await? {
            return Err(RecallError::not_found("Category", id));
        }
        info!(user_id = %user_id, category_id = %id, "Category deleted");

        let cache = self.cache();
        let categories_key = cache_keys::categories(user_id);
        let flashcards_key = cache_keys::flashcards(user_id, id);
        spawn_reconcile("category.delete", async move {
            let field = cache.delete_field(&categories_key, id).await;
            // The store cascades the flashcards away with their category.
            let nested = cache.delete_key(&flashcards_key).await;
            field.and(nested)
        });

        Ok(())
    }
}

impl std::fmt::Debug for CategoryServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryServiceImpl")
            .field("cache_ttl", &self.cache_ttl)
            .finish_non_exhaustive()
    }
}
