//! 草稿快照缓存
//!
//! 学生“稍后继续”的草稿以 JSON 字符串写入缓存，支持 Moka（内存）与 Redis 两种后端，
//! 通过插件注册表按配置选择。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;

use crate::errors::Result;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    // 后端出错，无法确定是否存在
    ExistsButNoValue,
}

#[async_trait]
pub trait SnapshotCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    // ttl 为 0 时使用后端默认值；写入失败返回 CacheConnection
    async fn insert_raw(&self, key: String, value: String, ttl: u64) -> Result<()>;
    async fn remove(&self, key: &str);
    fn backend_name(&self) -> &'static str;
}
