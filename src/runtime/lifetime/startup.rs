use crate::cache::{SnapshotCache, register::get_snapshot_cache_plugin};
use crate::config::AppConfig;
use crate::runtime::AppState;
use crate::storage::{UserDirectory, create_backend};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub state: Arc<AppState>,
}

/// 按名称构建快照缓存
async fn build_cache(name: &str) -> Option<Arc<dyn SnapshotCache>> {
    let constructor = get_snapshot_cache_plugin(name)?;
    match constructor().await {
        Ok(cache) => {
            info!("Successfully created {} snapshot cache backend", name);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} snapshot cache: {}", name, e);
            None
        }
    }
}

/// 创建草稿快照缓存；配置的后端不可用时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn SnapshotCache>, Box<dyn std::error::Error>> {
    let config = AppConfig::get();
    let cache_type = config.cache.cache_type.as_str();

    info!("Attempting to create {} snapshot cache backend", cache_type);

    if let Some(cache) = build_cache(cache_type).await {
        return Ok(cache);
    }

    if cache_type != "moka" {
        warn!("Falling back to memory snapshot cache");
        if let Some(cache) = build_cache("moka").await {
            return Ok(cache);
        }
    }

    Err(format!("No snapshot cache backend available (tried: {cache_type})").into())
}

/// 准备服务器启动的上下文
///
/// 远端存储能力在这里一次性决定；构建失败只会降级为本地模式。
pub async fn prepare_server_startup() -> StartupContext {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    if cfg!(debug_assertions) {
        crate::cache::register::debug_snapshot_cache_registry();
        debug!("Debug mode: Snapshot cache registry is enabled");
    }

    let config = AppConfig::get();

    let backend = create_backend(&config.remote).await;
    info!("Remote store mode: {}", backend.mode());

    let cache = create_cache()
        .await
        .expect("Failed to create snapshot cache");
    info!("Snapshot cache backend initialized");

    let users = UserDirectory::demo();
    info!("Seeded {} demo user(s)", users.all().len());

    let state = Arc::new(AppState::new(
        config.app.system_name.clone(),
        backend,
        cache,
        users,
        &config.survey,
    ));

    // 首次加载失败不影响启动，目录保持为空
    match state.reload().await {
        Ok(result) if result.reloaded => info!(
            "Loaded {} subject(s) and {} submission(s) from remote store",
            result.subjects, result.submissions
        ),
        Ok(_) => info!("Local-only mode: starting with an empty catalog"),
        Err(e) => warn!("Initial load from remote store failed: {}", e),
    }

    StartupContext { state }
}
