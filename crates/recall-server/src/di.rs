//! Dependency injection module using Shaku.
//!
//! One module holds the whole stack: the MySQL pool and repositories, the
//! Redis cache (disabled when `redis.enabled = false`), and the services.

use deadpool_redis::Pool;
use recall_config::{AppConfig, RedisConfig};
use recall_core::{module, HasComponent, RecallResult};
use recall_repository::{
    create_pool, CategoryRepository, DatabasePool, DatabasePoolInterface, DatabasePoolParameters,
    FlashcardRepository, MySqlCategoryRepository, MySqlFlashcardRepository,
};
use recall_service::{
    create_redis_pool, CacheInterface, CategoryService, CategoryServiceImpl,
    CategoryServiceImplParameters, FlashcardService, FlashcardServiceImpl,
    FlashcardServiceImplParameters, RedisCacheService, RedisCacheServiceParameters,
};
use std::sync::Arc;
use tracing::info;

module! {
    pub AppModule {
        components = [
            DatabasePool,
            MySqlCategoryRepository,
            MySqlFlashcardRepository,
            RedisCacheService,
            CategoryServiceImpl,
            FlashcardServiceImpl,
        ],
        providers = [],
    }
}

/// Connects to MySQL and Redis, runs migrations, and builds the module.
pub async fn build_app_module(config: &AppConfig) -> RecallResult<Arc<AppModule>> {
    let db_pool = create_pool(&config.database).await?;
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let cache_pool = create_redis_pool(&config.redis)?;

    Ok(Arc::new(assemble_module(&db_pool, cache_pool, &config.redis)))
}

/// Builds the module from already-created pools.
///
/// `cache_pool = None` wires a disabled cache: empty reads, no-op writes.
pub fn assemble_module(
    db_pool: &DatabasePool,
    cache_pool: Option<Arc<Pool>>,
    redis_config: &RedisConfig,
) -> AppModule {
    let cache_ttl = redis_config.cache_ttl();
    info!(
        cache_enabled = cache_pool.is_some(),
        cache_ttl_secs = cache_ttl.as_secs(),
        "Assembling application module"
    );

    AppModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
            pool: cache_pool,
            operation_timeout: redis_config.operation_timeout(),
        })
        .with_component_parameters::<CategoryServiceImpl>(CategoryServiceImplParameters {
            cache_ttl,
        })
        .with_component_parameters::<FlashcardServiceImpl>(FlashcardServiceImplParameters {
            cache_ttl,
        })
        .build()
}

/// Trait for resolving services from a module.
pub trait ServiceResolver {
    /// Resolves the category service.
    fn category_service(&self) -> Arc<dyn CategoryService>;

    /// Resolves the flashcard service.
    fn flashcard_service(&self) -> Arc<dyn FlashcardService>;
}

impl ServiceResolver for AppModule {
    fn category_service(&self) -> Arc<dyn CategoryService> {
        self.resolve()
    }

    fn flashcard_service(&self) -> Arc<dyn FlashcardService> {
        self.resolve()
    }
}

/// Trait for resolving infrastructure handles from a module.
pub trait InfrastructureResolver {
    /// Resolves the database pool.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;

    /// Resolves the shared cache client.
    fn cache(&self) -> Arc<dyn CacheInterface>;
}

impl InfrastructureResolver for AppModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }
}
