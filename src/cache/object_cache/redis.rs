use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error};

use crate::cache::{CacheResult, SnapshotCache};
use crate::config::{AppConfig, RedisConfig};
use crate::errors::FeedbackError;

pub struct RedisSnapshotCache {
    client: redis::Client,
    key_prefix: String,
    ttl: u64, // TTL in seconds
}

impl RedisSnapshotCache {
    pub fn new(redis_config: &RedisConfig, default_ttl: u64) -> Result<Self, String> {
        debug!(
            "RedisSnapshotCache created with prefix: '{}', TTL: {}s",
            redis_config.key_prefix, default_ttl
        );

        let client = redis::Client::open(redis_config.url.clone())
            .map_err(|e| format!("Invalid Redis URL '{}': {e}", redis_config.url))?;

        // 测试 Redis 连接 - 使用同步连接进行简单测试
        let mut conn = client.get_connection().map_err(|e| {
            error!(
                "Failed to connect to Redis server: {}. Check Redis server status and URL: {}",
                e, redis_config.url
            );
            format!("Redis connection failed: {e}")
        })?;
        let response = redis::cmd("PING")
            .query::<String>(&mut conn)
            .map_err(|e| {
                error!(
                    "Failed to ping Redis server: {}. Check Redis server status and URL: {}",
                    e, redis_config.url
                );
                format!("Redis ping failed: {e}")
            })?;
        debug!("Redis connection test successful: {}", response);

        Ok(Self {
            client,
            key_prefix: redis_config.key_prefix.clone(),
            ttl: default_ttl,
        })
    }

    pub fn from_config() -> Result<Self, String> {
        let config = AppConfig::get();
        Self::new(&config.cache.redis, config.cache.default_ttl)
    }

    async fn get_connection(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl SnapshotCache for RedisSnapshotCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let redis_key = self.make_key(key);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                return CacheResult::ExistsButNoValue;
            }
        };

        let result: redis::RedisResult<Option<String>> = conn.get(redis_key).await;

        match result {
            Ok(Some(data)) => {
                debug!("Successfully retrieved snapshot: {}", key);
                CacheResult::Found(data)
            }
            Ok(None) => {
                debug!("Snapshot not found in cache: {}", key);
                CacheResult::NotFound
            }
            Err(e) => {
                error!("Failed to get key '{}': {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) -> crate::errors::Result<()> {
        let redis_key = self.make_key(&key);

        let mut conn = self.get_connection().await.map_err(|e| {
            error!("Failed to get Redis connection: {}", e);
            FeedbackError::cache_connection(format!("Redis connection failed: {e}"))
        })?;

        // 使用传入的 TTL，如果为 0 则使用默认 TTL
        let effective_ttl = if ttl == 0 { self.ttl } else { ttl };

        match conn
            .set_ex::<String, String, ()>(redis_key, value, effective_ttl)
            .await
        {
            Ok(_) => {
                debug!(
                    "Successfully stored snapshot: {} (TTL: {}s)",
                    key, effective_ttl
                );
                Ok(())
            }
            Err(e) => {
                error!("Failed to store snapshot '{}': {}", key, e);
                Err(FeedbackError::cache_connection(format!(
                    "Failed to store snapshot: {e}"
                )))
            }
        }
    }

    async fn remove(&self, key: &str) {
        let redis_key = self.make_key(key);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                return;
            }
        };

        if let Err(e) = conn.del::<String, i32>(redis_key).await {
            error!("Failed to remove snapshot '{}': {}", key, e);
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
