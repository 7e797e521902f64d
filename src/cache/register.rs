use crate::cache::SnapshotCache;
use crate::cache::object_cache::{MokaSnapshotCache, RedisSnapshotCache};
use crate::errors::{FeedbackError, Result};
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, Once, RwLock},
};

pub type BoxedSnapshotCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn SnapshotCache>>> + Send>>;
pub type SnapshotCacheConstructor = Arc<dyn Fn() -> BoxedSnapshotCacheFuture + Send + Sync>;

static SNAPSHOT_CACHE_REGISTRY: Lazy<RwLock<HashMap<String, SnapshotCacheConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

static BUILTIN_PLUGINS: Once = Once::new();

pub fn register_snapshot_cache_plugin<S: Into<String>>(
    name: S,
    constructor: SnapshotCacheConstructor,
) {
    let name = name.into();
    let mut registry = SNAPSHOT_CACHE_REGISTRY
        .write()
        .expect("Cache registry lock poisoned");
    registry.insert(name, constructor);
}

pub fn get_snapshot_cache_plugin(name: &str) -> Option<SnapshotCacheConstructor> {
    register_builtin_plugins();
    SNAPSHOT_CACHE_REGISTRY
        .read()
        .expect("Cache registry lock poisoned")
        .get(name)
        .cloned()
}

/// 注册内置的 moka / redis 后端，只执行一次
pub fn register_builtin_plugins() {
    BUILTIN_PLUGINS.call_once(|| {
        register_snapshot_cache_plugin(
            "moka",
            Arc::new(|| {
                Box::pin(async {
                    let cache = MokaSnapshotCache::from_config();
                    Ok(Box::new(cache) as Box<dyn SnapshotCache>)
                })
            }),
        );
        register_snapshot_cache_plugin(
            "redis",
            Arc::new(|| {
                Box::pin(async {
                    let cache = RedisSnapshotCache::from_config()
                        .map_err(FeedbackError::cache_connection)?;
                    Ok(Box::new(cache) as Box<dyn SnapshotCache>)
                })
            }),
        );
    });
}

pub fn debug_snapshot_cache_registry() {
    register_builtin_plugins();
    let registry = SNAPSHOT_CACHE_REGISTRY
        .read()
        .expect("Cache registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No snapshot cache plugins registered.");
    } else {
        tracing::debug!("Registered snapshot cache plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_plugins_registered() {
        assert!(get_snapshot_cache_plugin("moka").is_some());
        assert!(get_snapshot_cache_plugin("redis").is_some());
        assert!(get_snapshot_cache_plugin("memcached").is_none());
    }
}
