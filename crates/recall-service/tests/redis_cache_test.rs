//! Integration tests for the Redis cache backend.
//!
//! These run against a real Redis server using testcontainers and need
//! Docker, so they are ignored by default:
//! `cargo test -p recall-service -- --ignored`

use recall_config::RedisConfig;
use recall_core::{Category, CategoryId, UserId};
use recall_service::cache::cache_keys;
use recall_service::{create_redis_pool, CacheInterface, CacheService, RedisCacheService};
use std::sync::Arc;
use std::time::Duration;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::{Redis, REDIS_PORT};

struct TestRedis {
    _container: ContainerAsync<Redis>,
    cache: Arc<RedisCacheService>,
}

impl TestRedis {
    async fn new() -> Self {
        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");
        let port = container
            .get_host_port_ipv4(REDIS_PORT)
            .await
            .expect("Failed to get Redis port");

        let config = RedisConfig {
            url: format!("redis://127.0.0.1:{port}"),
            ..RedisConfig::default()
        };
        let pool = create_redis_pool(&config)
            .expect("Failed to build Redis pool")
            .expect("Redis should be enabled");

        Self {
            _container: container,
            cache: Arc::new(RedisCacheService::with_timeout(pool, Duration::from_secs(5))),
        }
    }
}

fn category(id: i64, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        owner_id: UserId::parse("u1").unwrap(),
        created_at: None,
        updated_at: None,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_ping() {
    let redis = TestRedis::new().await;
    redis.cache.ping().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_collection_round_trip_and_field_delete() {
    let redis = TestRedis::new().await;
    let cache = CacheService::new(redis.cache.clone(), Duration::from_secs(300));
    let key = cache_keys::categories(&UserId::parse("u1").unwrap());

    cache
        .save_collection(&key, &[category(2, "Plants"), category(1, "Animals")])
        .await
        .unwrap();

    let all: Vec<Category> = cache.get_all(&key).await.unwrap();
    assert_eq!(all, vec![category(1, "Animals"), category(2, "Plants")]);

    cache.delete_field(&key, 1).await.unwrap();
    assert!(cache
        .get_one::<Category>(&key, 1)
        .await
        .unwrap_err()
        .is_cache_miss());
    let one: Category = cache.get_one(&key, 2).await.unwrap();
    assert_eq!(one.name, "Plants");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_write_sets_ttl_on_key() {
    let redis = TestRedis::new().await;
    redis
        .cache
        .hset_with_expiry(
            "category:u1",
            &[("1".to_string(), "{}".to_string())],
            Duration::from_secs(2),
        )
        .await
        .unwrap();
    assert_eq!(redis.cache.hgetall("category:u1").await.unwrap().len(), 1);

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert!(redis.cache.hgetall("category:u1").await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_key() {
    let redis = TestRedis::new().await;
    redis
        .cache
        .hset_with_expiry(
            "flashcard:u1:1",
            &[("1".to_string(), "{}".to_string())],
            Duration::from_secs(300),
        )
        .await
        .unwrap();

    assert!(redis.cache.delete("flashcard:u1:1").await.unwrap());
    assert!(!redis.cache.delete("flashcard:u1:1").await.unwrap());
}
