//! Application state for Axum handlers.

use recall_repository::DatabasePoolInterface;
use recall_service::{CacheInterface, CategoryService, FlashcardService};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub category_service: Arc<dyn CategoryService>,
    pub flashcard_service: Arc<dyn FlashcardService>,
    /// Probed by the readiness endpoint.
    pub database: Arc<dyn DatabasePoolInterface>,
    /// Probed by the readiness endpoint.
    pub cache: Arc<dyn CacheInterface>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        category_service: Arc<dyn CategoryService>,
        flashcard_service: Arc<dyn FlashcardService>,
        database: Arc<dyn DatabasePoolInterface>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            category_service,
            flashcard_service,
            database,
            cache,
        }
    }

    /// Resolves every dependency from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module
            + HasComponent<dyn CategoryService>
            + HasComponent<dyn FlashcardService>
            + HasComponent<dyn DatabasePoolInterface>
            + HasComponent<dyn CacheInterface>,
    {
        Self {
            category_service: module.resolve(),
            flashcard_service: module.resolve(),
            database: module.resolve(),
            cache: module.resolve(),
        }
    }
}
