//! 数据存储层
//!
//! 远端存储按行读写三个集合（课程、提交、评分明细）。是否可用在启动时一次性决定，
//! 之后所有存储操作都对 [`Backend`] 做模式匹配：
//! - 课程目录的写操作在远端失败或不可用时回退到本地内存
//! - 提交锁定没有本地回退，远端不可用即失败

use std::sync::Arc;
use tracing::warn;

use crate::config::RemoteConfig;
use crate::errors::Result;

pub mod catalog_store;
pub mod rows;
pub mod sea_orm_storage;
pub mod submission_store;
pub mod user_directory;

#[cfg(test)]
pub mod testing;

pub use catalog_store::CatalogStore;
pub use rows::{FeedbackItemRow, SubjectRow, SubmissionRow};
pub use submission_store::SubmissionStore;
pub use user_directory::UserDirectory;

#[async_trait::async_trait]
pub trait RemoteStore: Send + Sync {
    /// 课程
    async fn select_subjects(&self) -> Result<Vec<SubjectRow>>;
    async fn insert_subject(&self, row: SubjectRow) -> Result<SubjectRow>;
    async fn update_subject(&self, id: i64, row: SubjectRow) -> Result<SubjectRow>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 提交
    async fn select_submissions(&self) -> Result<Vec<SubmissionRow>>;
    async fn select_feedback_items(&self) -> Result<Vec<FeedbackItemRow>>;

    /// 原子写入一次提交及其全部评分明细
    ///
    /// `row.id` 为空时新建，否则更新该行并整体替换明细；明细的 `submission_id`
    /// 由实现填写。任一步失败时不留下任何改动。
    async fn replace_submission(
        &self,
        row: SubmissionRow,
        items: Vec<FeedbackItemRow>,
    ) -> Result<SubmissionRow>;
}

/// 远端存储能力：启动时决定，会话内不再改变
#[derive(Clone)]
pub enum Backend {
    Connected(Arc<dyn RemoteStore>),
    LocalOnly,
}

impl Backend {
    pub fn mode(&self) -> &'static str {
        match self {
            Backend::Connected(_) => "connected",
            Backend::LocalOnly => "local_only",
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Backend::{}", self.mode())
    }
}

/// 按配置构建远端存储；未配置或构建失败时降级为纯本地模式，不向用户报错
pub async fn create_backend(config: &RemoteConfig) -> Backend {
    if config.url.trim().is_empty() {
        warn!("No remote store configured, running in local-only mode");
        return Backend::LocalOnly;
    }

    match sea_orm_storage::SeaOrmRemoteStore::connect(config).await {
        Ok(store) => Backend::Connected(Arc::new(store)),
        Err(e) => {
            warn!(
                "Failed to construct remote store ({}), running in local-only mode",
                e
            );
            Backend::LocalOnly
        }
    }
}
