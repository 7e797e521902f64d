//! 问卷提交存储
//!
//! 与课程目录不同，锁定提交没有本地回退：远端不可用或写入失败时直接返回错误，
//! 内存中的提交列表只在远端写入成功后更新。列表保持最新提交在前。

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

use super::{Backend, FeedbackItemRow, SubmissionRow};
use crate::errors::{FeedbackError, Result};
use crate::models::SubmissionKey;
use crate::models::submissions::entities::{FeedbackItem, MAX_RATING, Submission};
use crate::survey::LockRequest;

pub struct SubmissionStore {
    backend: Backend,
    submissions: RwLock<Vec<Submission>>,
}

impl SubmissionStore {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            submissions: RwLock::new(Vec::new()),
        }
    }

    pub async fn list(&self) -> Vec<Submission> {
        self.submissions.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.submissions.read().await.len()
    }

    pub async fn find(&self, key: &SubmissionKey) -> Option<Submission> {
        self.submissions
            .read()
            .await
            .iter()
            .find(|s| s.key() == *key)
            .cloned()
    }

    pub async fn for_student(&self, student_id: i64) -> Vec<Submission> {
        self.submissions
            .read()
            .await
            .iter()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect()
    }

    /// 写入一次锁定
    ///
    /// 已有提交时原地更新并整体替换评分明细，否则新建。
    pub async fn persist(
        &self,
        request: LockRequest,
        existing: Option<&Submission>,
    ) -> Result<Submission> {
        let Backend::Connected(remote) = &self.backend else {
            return Err(FeedbackError::store_unavailable(
                "Remote store is not configured; feedback cannot be submitted",
            ));
        };

        let submitted_at = Utc::now().timestamp();
        let row = SubmissionRow {
            id: existing.map(|s| s.id),
            student_id: request.key.student_id,
            program: request.key.program.to_string(),
            semester: request.key.semester.to_string(),
            anonymous: request.anonymous,
            submitted_at,
        };

        let items = request
            .items
            .iter()
            .map(|item| FeedbackItemRow {
                id: None,
                submission_id: 0,
                subject_id: item.subject_id,
                rating: item.rating as i16,
                comment: item.comment.clone(),
            })
            .collect();

        // 提交行与明细在同一事务内写入
        let saved = remote.replace_submission(row, items).await?;
        let submission_id = saved
            .id
            .ok_or_else(|| FeedbackError::remote_operation("Remote returned a submission without id"))?;

        let submission = Submission {
            id: submission_id,
            student_id: request.key.student_id,
            program: request.key.program,
            semester: request.key.semester,
            anonymous: request.anonymous,
            submitted_at: timestamp(saved.submitted_at),
            items: request.items,
        };

        let mut submissions = self.submissions.write().await;
        submissions.retain(|s| s.id != submission_id);
        submissions.insert(0, submission.clone());

        info!(
            "Submission {} stored for student {} ({} {})",
            submission.id, submission.student_id, submission.program, submission.semester
        );
        Ok(submission)
    }

    /// 读取并组装远端提交，不改动本地列表；本地模式返回 `None`
    pub async fn fetch(&self) -> Result<Option<Vec<Submission>>> {
        let Backend::Connected(remote) = &self.backend else {
            return Ok(None);
        };

        let rows = remote.select_submissions().await?;
        let items = remote.select_feedback_items().await?;
        assemble_submissions(rows, items).map(Some)
    }

    pub async fn replace_all(&self, submissions: Vec<Submission>) -> usize {
        let count = submissions.len();
        *self.submissions.write().await = submissions;
        count
    }

    /// 用远端数据整体替换本地提交列表
    pub async fn reload(&self) -> Result<Option<usize>> {
        match self.fetch().await? {
            Some(submissions) => Ok(Some(self.replace_all(submissions).await)),
            None => Ok(None),
        }
    }
}

/// 把提交行与明细行组装成提交，按提交时间倒序、ID 倒序排列
pub(crate) fn assemble_submissions(
    rows: Vec<SubmissionRow>,
    items: Vec<FeedbackItemRow>,
) -> Result<Vec<Submission>> {
    let mut grouped: HashMap<i64, Vec<FeedbackItem>> = HashMap::new();
    for item in items {
        let rating = u8::try_from(item.rating)
            .ok()
            .filter(|r| *r <= MAX_RATING)
            .ok_or_else(|| {
                FeedbackError::serialization(format!("Invalid stored rating {}", item.rating))
            })?;
        grouped
            .entry(item.submission_id)
            .or_default()
            .push(FeedbackItem {
                subject_id: item.subject_id,
                rating,
                comment: item.comment,
            });
    }

    let mut submissions = rows
        .into_iter()
        .map(|row| {
            let id = row
                .id
                .ok_or_else(|| FeedbackError::serialization("Submission row is missing its id"))?;
            Ok(Submission {
                id,
                student_id: row.student_id,
                program: row.program.parse().map_err(FeedbackError::serialization)?,
                semester: row.semester.parse().map_err(FeedbackError::serialization)?,
                anonymous: row.anonymous,
                submitted_at: timestamp(row.submitted_at),
                items: grouped.remove(&id).unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    submissions.sort_by(|a, b| {
        b.submitted_at
            .cmp(&a.submitted_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    Ok(submissions)
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
}
