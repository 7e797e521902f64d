//! 应用状态
//!
//! 所有请求共享的唯一状态边界：课程目录、提交存储、用户目录、会话开关、
//! 进行中的草稿与快照、防重入门以及操作日志。

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::cache::SnapshotCache;
use crate::config::SurveyConfig;
use crate::errors::Result;
use crate::models::system::responses::ReloadResponse;
use crate::runtime::ActivityLog;
use crate::storage::{Backend, CatalogStore, SubmissionStore, UserDirectory};
use crate::survey::{DraftRegistry, DraftSnapshots, InFlightGate, SurveySettings};

pub struct AppState {
    pub system_name: String,
    pub backend: Backend,
    pub catalog: CatalogStore,
    pub submissions: SubmissionStore,
    pub users: UserDirectory,
    pub drafts: DraftRegistry,
    pub snapshots: DraftSnapshots,
    pub gate: InFlightGate,
    pub activity: ActivityLog,
    pub max_comments: usize,
    settings: RwLock<SurveySettings>,
}

impl AppState {
    pub fn new(
        system_name: impl Into<String>,
        backend: Backend,
        cache: Arc<dyn SnapshotCache>,
        users: UserDirectory,
        survey: &SurveyConfig,
    ) -> Self {
        Self {
            system_name: system_name.into(),
            catalog: CatalogStore::new(backend.clone()),
            submissions: SubmissionStore::new(backend.clone()),
            backend,
            users,
            drafts: DraftRegistry::new(),
            snapshots: DraftSnapshots::new(cache),
            gate: InFlightGate::new(),
            activity: ActivityLog::new(survey.activity_log_capacity),
            max_comments: survey.max_comments,
            settings: RwLock::new(SurveySettings::from_config(survey)),
        }
    }

    pub async fn settings(&self) -> SurveySettings {
        *self.settings.read().await
    }

    pub async fn update_settings(
        &self,
        update: &crate::models::system::requests::UpdateSettingsRequest,
    ) -> SurveySettings {
        let mut settings = self.settings.write().await;
        settings.apply(update);
        *settings
    }

    /// 从远端整体重新加载课程与提交；本地模式下不做任何事
    pub async fn reload(&self) -> Result<ReloadResponse> {
        // 两个集合都读取成功后才一起替换
        let fetched = match (self.catalog.fetch().await, self.submissions.fetch().await) {
            (Err(e), _) | (_, Err(e)) => {
                warn!("Reload from remote store failed: {}", e);
                return Err(e);
            }
            (Ok(Some(subjects)), Ok(Some(submissions))) => Some((subjects, submissions)),
            _ => None,
        };
        let Some((subjects, submissions)) = fetched else {
            return Ok(ReloadResponse {
                reloaded: false,
                subjects: self.catalog.len().await,
                submissions: self.submissions.len().await,
            });
        };

        let subjects = self.catalog.replace_all(subjects).await;
        let submissions = self.submissions.replace_all(submissions).await;

        self.activity
            .record(format!(
                "Reloaded {subjects} subject(s) and {submissions} submission(s) from remote store"
            ))
            .await;

        Ok(ReloadResponse {
            reloaded: true,
            subjects,
            submissions,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::cache::object_cache::MokaSnapshotCache;

    pub fn state_with(backend: Backend) -> AppState {
        AppState::new(
            "Course Feedback",
            backend,
            Arc::new(MokaSnapshotCache::new(100, 600)),
            UserDirectory::demo(),
            &SurveyConfig::default(),
        )
    }
}
