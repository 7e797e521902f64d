//! 进行中的草稿与“稍后继续”快照
//!
//! 每个学生同时只有一个活动问卷；切换学期会丢弃未保存的修改。
//! 快照显式保存、显式读取，不会自动恢复。

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::{CacheResult, SnapshotCache};
use crate::errors::{FeedbackError, Result};
use crate::models::SubmissionKey;
use crate::models::subjects::entities::Subject;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::responses::DraftSnapshot;
use crate::survey::{DraftSession, LifecycleState};

#[derive(Debug, Default)]
pub struct DraftRegistry {
    sessions: DashMap<i64, DraftSession>,
}

impl DraftRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 打开或切换学生的活动问卷
    ///
    /// 同一范围内未锁定的草稿会保留并与最新课程目录对齐；
    /// 其他情况（新范围或已锁定）从存储重新装载。
    pub fn open(
        &self,
        key: SubmissionKey,
        scope: &[Subject],
        existing: Option<&Submission>,
    ) -> DraftSession {
        let student_id = key.student_id;

        if let Some(mut current) = self.sessions.get_mut(&student_id)
            && current.value().key() == key
            && current.value().state() != LifecycleState::Locked
        {
            current.sync_scope(scope);
            return current.value().clone();
        }

        let session = DraftSession::open(key, scope, existing);
        if let Some(previous) = self.sessions.insert(student_id, session.clone())
            && previous.key() != key
            && previous.state() == LifecycleState::Drafting
        {
            debug!(
                "Discarding unsaved draft of student {} for {} {}",
                student_id,
                previous.key().program,
                previous.key().semester
            );
        }
        session
    }

    pub fn get(&self, student_id: i64) -> Option<DraftSession> {
        self.sessions.get(&student_id).map(|s| s.value().clone())
    }

    /// 在学生的活动问卷上执行修改
    pub fn update<R>(
        &self,
        student_id: i64,
        f: impl FnOnce(&mut DraftSession) -> Result<R>,
    ) -> Result<R> {
        let mut session = self
            .sessions
            .get_mut(&student_id)
            .ok_or_else(|| FeedbackError::not_found("No feedback form is open"))?;
        f(&mut session)
    }
}

/// 草稿快照读写，底层为可替换的缓存后端
#[derive(Clone)]
pub struct DraftSnapshots {
    cache: Arc<dyn SnapshotCache>,
}

impl DraftSnapshots {
    pub fn new(cache: Arc<dyn SnapshotCache>) -> Self {
        Self { cache }
    }

    pub fn backend_name(&self) -> &'static str {
        self.cache.backend_name()
    }

    pub async fn save(&self, session: &DraftSession) -> Result<DraftSnapshot> {
        let snapshot = DraftSnapshot {
            items: session.items().to_vec(),
            anonymous: session.anonymous(),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string(&snapshot)?;
        self.cache
            .insert_raw(session.key().snapshot_key(), json, 0)
            .await?;
        Ok(snapshot)
    }

    pub async fn load(&self, key: &SubmissionKey) -> Result<Option<DraftSnapshot>> {
        let cache_key = key.snapshot_key();
        match self.cache.get_raw(&cache_key).await {
            CacheResult::Found(json) => match serde_json::from_str::<DraftSnapshot>(&json) {
                Ok(snapshot) => Ok(Some(snapshot)),
                Err(e) => {
                    warn!("Discarding unreadable draft snapshot {}: {}", cache_key, e);
                    self.cache.remove(&cache_key).await;
                    Ok(None)
                }
            },
            CacheResult::NotFound => Ok(None),
            CacheResult::ExistsButNoValue => Err(FeedbackError::cache_connection(
                "Draft snapshot store is unavailable",
            )),
        }
    }

    pub async fn discard(&self, key: &SubmissionKey) {
        self.cache.remove(&key.snapshot_key()).await;
    }
}
