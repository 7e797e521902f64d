//! 草稿生命周期
//!
//! 单个学生在某个专业学期下的问卷状态：
//! - `Empty`：尚无提交，也未开始填写
//! - `Drafting`：本地编辑中，尚未持久化
//! - `Locked`：已存在提交
//!
//! `Drafting -> Locked` 要求范围内每门课程评分都不低于 1。
//! 锁定后默认不可再编辑；开启“提交前可修改”时可以回到 `Drafting`，
//! 重新提交仍需满足同样的完整性要求。

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::errors::{FeedbackError, Result};
use crate::models::SubmissionKey;
use crate::models::subjects::entities::Subject;
use crate::models::submissions::entities::{FeedbackItem, MAX_RATING, Submission};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Empty,
    Drafting,
    Locked,
}

/// 锁定后是否还能修改
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPolicy {
    LockAfterSubmit,
    EditUntilSubmit,
}

impl EditPolicy {
    pub fn allows_resubmit(&self) -> bool {
        matches!(self, EditPolicy::EditUntilSubmit)
    }
}

/// 通过校验、等待写入存储的提交内容
#[derive(Debug, Clone, PartialEq)]
pub struct LockRequest {
    pub key: SubmissionKey,
    pub anonymous: bool,
    pub items: Vec<FeedbackItem>,
}

#[derive(Debug, Clone)]
pub struct DraftSession {
    key: SubmissionKey,
    state: LifecycleState,
    items: Vec<FeedbackItem>,
    anonymous: bool,
    submitted_at: Option<DateTime<Utc>>,
}

impl DraftSession {
    /// 打开问卷；已有提交时从提交恢复并进入 `Locked`
    ///
    /// 按课程 ID 合并，提交之后新增的课程显示为未评分。
    pub fn open(key: SubmissionKey, scope: &[Subject], existing: Option<&Submission>) -> Self {
        let mut session = Self {
            key,
            state: LifecycleState::Empty,
            items: Vec::new(),
            anonymous: false,
            submitted_at: None,
        };

        if let Some(submission) = existing {
            session.mark_locked(submission);
        }

        session.sync_scope(scope);
        session
    }

    pub fn key(&self) -> SubmissionKey {
        self.key
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn items(&self) -> &[FeedbackItem] {
        &self.items
    }

    pub fn anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// 尚未评分的课程数
    pub fn remaining(&self) -> usize {
        self.items.len() - self.items.iter().filter(|i| i.is_rated()).count()
    }

    pub fn is_editable(&self, policy: EditPolicy) -> bool {
        self.state != LifecycleState::Locked || policy.allows_resubmit()
    }

    /// 让条目与当前课程范围对齐：保留已有评分，补齐新增课程，移除已不在范围内的课程
    pub fn sync_scope(&mut self, scope: &[Subject]) {
        let mut previous: HashMap<i64, FeedbackItem> = self
            .items
            .drain(..)
            .map(|item| (item.subject_id, item))
            .collect();

        self.items = scope
            .iter()
            .map(|subject| {
                previous
                    .remove(&subject.id)
                    .unwrap_or_else(|| FeedbackItem::unrated(subject.id))
            })
            .collect();
    }

    pub fn set_rating(&mut self, subject_id: i64, rating: u8, policy: EditPolicy) -> Result<()> {
        if rating > MAX_RATING {
            return Err(FeedbackError::validation(format!(
                "Rating must be between 1 and {MAX_RATING}"
            )));
        }
        let index = self.index_of(subject_id)?;
        self.begin_edit(policy)?;
        self.items[index].rating = rating;
        Ok(())
    }

    pub fn set_comment(
        &mut self,
        subject_id: i64,
        comment: Option<String>,
        policy: EditPolicy,
    ) -> Result<()> {
        let index = self.index_of(subject_id)?;
        self.begin_edit(policy)?;
        self.items[index].comment = comment.filter(|c| !c.trim().is_empty());
        Ok(())
    }

    pub fn set_anonymous(&mut self, anonymous: bool, allowed: bool, policy: EditPolicy) -> Result<()> {
        if anonymous && !allowed {
            return Err(FeedbackError::validation(
                "Anonymous submissions are currently disabled",
            ));
        }
        self.begin_edit(policy)?;
        self.anonymous = anonymous;
        Ok(())
    }

    /// 用快照中的条目覆盖当前评分，快照中已不在范围内的课程被忽略
    pub fn restore(
        &mut self,
        items: &[FeedbackItem],
        anonymous: bool,
        policy: EditPolicy,
    ) -> Result<()> {
        self.begin_edit(policy)?;
        for saved in items {
            if let Some(item) = self
                .items
                .iter_mut()
                .find(|item| item.subject_id == saved.subject_id)
            {
                item.rating = saved.rating.min(MAX_RATING);
                item.comment = saved.comment.clone();
            }
        }
        self.anonymous = anonymous;
        Ok(())
    }

    /// 校验并生成锁定请求，不改变状态
    pub fn prepare_lock(&self, policy: EditPolicy) -> Result<LockRequest> {
        if !self.is_editable(policy) {
            return Err(FeedbackError::edit_locked(
                "Feedback already submitted for this semester",
            ));
        }

        let remaining = self.remaining();
        if remaining > 0 {
            return Err(FeedbackError::validation(format!(
                "Please rate all subjects: {remaining} remaining"
            )));
        }

        Ok(LockRequest {
            key: self.key,
            anonymous: self.anonymous,
            items: self.items.clone(),
        })
    }

    /// 存储写入成功后进入 `Locked`
    pub fn mark_locked(&mut self, submission: &Submission) {
        self.items = submission.items.clone();
        self.anonymous = submission.anonymous;
        self.submitted_at = Some(submission.submitted_at);
        self.state = LifecycleState::Locked;
    }

    fn index_of(&self, subject_id: i64) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.subject_id == subject_id)
            .ok_or_else(|| {
                FeedbackError::not_found(format!("Subject {subject_id} is not in this form"))
            })
    }

    fn begin_edit(&mut self, policy: EditPolicy) -> Result<()> {
        if !self.is_editable(policy) {
            return Err(FeedbackError::edit_locked(
                "Feedback already submitted; edits are disabled",
            ));
        }
        self.state = LifecycleState::Drafting;
        Ok(())
    }
}
