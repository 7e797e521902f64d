use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use crate::cache::{CacheResult, SnapshotCache};
use crate::config::AppConfig;
use crate::errors::Result;

pub struct MokaSnapshotCache {
    inner: Cache<String, String>,
}

impl MokaSnapshotCache {
    pub fn new(max_capacity: u64, ttl_secs: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        debug!(
            "MokaSnapshotCache initialized with max capacity: {}",
            max_capacity
        );
        Self { inner }
    }

    pub fn from_config() -> Self {
        let config = AppConfig::get();
        Self::new(config.cache.memory.max_capacity, config.cache.default_ttl)
    }
}

#[async_trait]
impl SnapshotCache for MokaSnapshotCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        if let Some(value) = self.inner.get(key).await {
            debug!("Successfully retrieved snapshot: {}", key);
            CacheResult::Found(value)
        } else {
            debug!("Snapshot not found in cache: {}", key);
            CacheResult::NotFound
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) -> Result<()> {
        // Moka 使用创建时设置的全局 TTL
        self.inner.insert(key, value).await;
        if ttl != 0 {
            debug!("Moka cache ignores per-item TTL, using global TTL configuration");
        }
        Ok(())
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    fn backend_name(&self) -> &'static str {
        "moka"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaSnapshotCache::new(100, 60);
        assert_eq!(cache.get_raw("draft:1:MBA:I").await, CacheResult::NotFound);

        cache
            .insert_raw("draft:1:MBA:I".into(), "{}".into(), 0)
            .await
            .unwrap();
        assert_eq!(
            cache.get_raw("draft:1:MBA:I").await,
            CacheResult::Found("{}".to_string())
        );

        cache.remove("draft:1:MBA:I").await;
        assert_eq!(cache.get_raw("draft:1:MBA:I").await, CacheResult::NotFound);
    }
}
