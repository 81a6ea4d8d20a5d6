//! In-memory doubles for the store and the cache.
//!
//! Compiled for this crate's tests and for downstream crates that enable the
//! `testing` feature.

use crate::cache::CacheInterface;
use async_trait::async_trait;
use parking_lot::Mutex;
use recall_core::{
    Category, CategoryId, Flashcard, FlashcardChanges, FlashcardId, NewFlashcard, RecallError,
    RecallResult, UserId,
};
use recall_repository::{CategoryRepository, FlashcardRepository};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

fn store_down() -> RecallError {
    RecallError::Database("store unavailable".to_string())
}

/// Category store kept in memory, counting reads.
#[derive(Debug)]
pub struct InMemoryCategoryRepository {
    rows: Mutex<BTreeMap<CategoryId, Category>>,
    next_id: AtomicI64,
    find_all_calls: AtomicUsize,
    failing: AtomicBool,
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            find_all_calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }
}

impl InMemoryCategoryRepository {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row directly, bypassing the service.
    pub fn seed(&self, owner_id: &UserId, name: &str) -> Category {
        let id = CategoryId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let category = Category::created(id, owner_id.clone(), name.to_string());
        self.rows.lock().insert(id, category.clone());
        category
    }

    /// Number of `find_all` calls so far.
    #[must_use]
    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail with a database error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> RecallResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(store_down());
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn insert(&self, user_id: &UserId, name: &str) -> RecallResult<CategoryId> {
        self.check()?;
        Ok(self.seed(user_id, name).id)
    }

    async fn find_all(&self, user_id: &UserId) -> RecallResult<Vec<Category>> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .rows
            .lock()
            .values()
            .filter(|c| &c.owner_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, user_id: &UserId, id: CategoryId, name: &str) -> RecallResult<bool> {
        self.check()?;
        let mut rows = self.rows.lock();
        match rows.get_mut(&id) {
            Some(category) if &category.owner_id == user_id => {
                category.rename(name.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, user_id: &UserId, id: CategoryId) -> RecallResult<bool> {
        self.check()?;
        let mut rows = self.rows.lock();
        if rows.get(&id).is_some_and(|c| &c.owner_id == user_id) {
            rows.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}

/// Flashcard store kept in memory, counting reads.
#[derive(Debug)]
pub struct InMemoryFlashcardRepository {
    rows: Mutex<BTreeMap<FlashcardId, Flashcard>>,
    next_id: AtomicI64,
    find_by_category_calls: AtomicUsize,
    find_by_id_calls: AtomicUsize,
    failing: AtomicBool,
}

impl Default for InMemoryFlashcardRepository {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            find_by_category_calls: AtomicUsize::new(0),
            find_by_id_calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }
}

impl InMemoryFlashcardRepository {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row directly, bypassing the service.
    pub fn seed(
        &self,
        owner_id: &UserId,
        category_id: CategoryId,
        name: &str,
        content: &str,
    ) -> Flashcard {
        let id = FlashcardId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let flashcard = Flashcard::created(
            id,
            owner_id.clone(),
            category_id,
            NewFlashcard {
                name: name.to_string(),
                content: content.to_string(),
            },
        );
        self.rows.lock().insert(id, flashcard.clone());
        flashcard
    }

    /// Current row for `id`, regardless of owner.
    #[must_use]
    pub fn row(&self, id: FlashcardId) -> Option<Flashcard> {
        self.rows.lock().get(&id).cloned()
    }

    /// Number of `find_by_category` calls so far.
    #[must_use]
    pub fn find_by_category_calls(&self) -> usize {
        self.find_by_category_calls.load(Ordering::SeqCst)
    }

    /// Number of `find_by_id` calls so far.
    #[must_use]
    pub fn find_by_id_calls(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail with a database error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> RecallResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(store_down());
        }
        Ok(())
    }

    fn owned(row: &Flashcard, user_id: &UserId, category_id: CategoryId) -> bool {
        &row.owner_id == user_id && row.category_id == category_id
    }
}

#[async_trait]
impl FlashcardRepository for InMemoryFlashcardRepository {
    async fn insert(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        flashcard: &NewFlashcard,
    ) -> RecallResult<FlashcardId> {
        self.check()?;
        Ok(self
            .seed(user_id, category_id, &flashcard.name, &flashcard.content)
            .id)
    }

    async fn insert_many(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        flashcards: &[NewFlashcard],
    ) -> RecallResult<u64> {
        self.check()?;
        for card in flashcards {
            self.seed(user_id, category_id, &card.name, &card.content);
        }
        Ok(flashcards.len() as u64)
    }

    async fn find_by_category(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
    ) -> RecallResult<Vec<Flashcard>> {
        self.find_by_category_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .rows
            .lock()
            .values()
            .filter(|row| Self::owned(row, user_id, category_id))
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
    ) -> RecallResult<Option<Flashcard>> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .rows
            .lock()
            .get(&id)
            .filter(|row| Self::owned(row, user_id, category_id))
            .cloned())
    }

    async fn update(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
        changes: &FlashcardChanges,
    ) -> RecallResult<bool> {
        self.check()?;
        let mut rows = self.rows.lock();
        match rows.get_mut(&id) {
            Some(row) if Self::owned(row, user_id, category_id) => {
                row.apply(changes);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(
        &self,
        user_id: &UserId,
        category_id: CategoryId,
        id: FlashcardId,
    ) -> RecallResult<bool> {
        self.check()?;
        let mut rows = self.rows.lock();
        if rows
            .get(&id)
            .is_some_and(|row| Self::owned(row, user_id, category_id))
        {
            rows.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}

/// Cache whose every operation fails as if Redis were unreachable.
#[derive(Debug, Default)]
pub struct FailingCache {
    calls: AtomicUsize,
}

impl FailingCache {
    /// Creates the cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations attempted.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> RecallResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RecallError::Cache("connection refused".to_string()))
    }
}

#[async_trait]
impl CacheInterface for FailingCache {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn hset_with_expiry(
        &self,
        _key: &str,
        _entries: &[(String, String)],
        _ttl: Duration,
    ) -> RecallResult<()> {
        self.fail()
    }

    async fn hget(&self, _key: &str, _field: &str) -> RecallResult<Option<String>> {
        self.fail()
    }

    async fn hgetall(&self, _key: &str) -> RecallResult<HashMap<String, String>> {
        self.fail()
    }

    async fn hdel(&self, _key: &str, _field: &str) -> RecallResult<bool> {
        self.fail()
    }

    async fn delete(&self, _key: &str) -> RecallResult<bool> {
        self.fail()
    }

    async fn ping(&self) -> RecallResult<()> {
        self.fail()
    }
}

/// Cache whose writes never complete. Reads report an empty cache.
///
/// Used to show that request completion does not wait on reconciliation.
#[derive(Debug, Default)]
pub struct StalledCache {
    writes_started: AtomicUsize,
}

impl StalledCache {
    /// Creates the cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes that began and are still parked.
    #[must_use]
    pub fn writes_started(&self) -> usize {
        self.writes_started.load(Ordering::SeqCst)
    }

    async fn park<T>(&self) -> RecallResult<T> {
        self.writes_started.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

#[async_trait]
impl CacheInterface for StalledCache {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn hset_with_expiry(
        &self,
        _key: &str,
        _entries: &[(String, String)],
        _ttl: Duration,
    ) -> RecallResult<()> {
        self.park().await
    }

    async fn hget(&self, _key: &str, _field: &str) -> RecallResult<Option<String>> {
        Ok(None)
    }

    async fn hgetall(&self, _key: &str) -> RecallResult<HashMap<String, String>> {
        Ok(HashMap::new())
    }

    async fn hdel(&self, _key: &str, _field: &str) -> RecallResult<bool> {
        self.park().await
    }

    async fn delete(&self, _key: &str) -> RecallResult<bool> {
        self.park().await
    }

    async fn ping(&self) -> RecallResult<()> {
        Ok(())
    }
}

/// Polls `check` until it holds, for up to two seconds of wall time.
///
/// Background reconciliation has no completion signal, so tests observe its
/// effect instead.
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..200 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
