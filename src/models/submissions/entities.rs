use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Program, Semester, SubmissionKey};

/// 评分未填写时的占位值
pub const UNSET_RATING: u8 = 0;
/// 评分上限
pub const MAX_RATING: u8 = 5;

/// 单门课程的评分，只存在于提交内部
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    pub subject_id: i64,
    // 0 表示未评分，1-5 为有效评分
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl FeedbackItem {
    pub fn unrated(subject_id: i64) -> Self {
        Self {
            subject_id,
            rating: UNSET_RATING,
            comment: None,
        }
    }

    pub fn is_rated(&self) -> bool {
        self.rating >= 1
    }

    /// 去除空白后的非空评论
    pub fn non_empty_comment(&self) -> Option<&str> {
        self.comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// 已锁定的问卷提交
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub student_id: i64,
    pub program: Program,
    pub semester: Semester,
    pub anonymous: bool,
    pub submitted_at: DateTime<Utc>,
    pub items: Vec<FeedbackItem>,
}

impl Submission {
    pub fn key(&self) -> SubmissionKey {
        SubmissionKey::new(self.student_id, self.program, self.semester)
    }

    pub fn in_scope(&self, program: Program, semester: Semester) -> bool {
        self.program == program && self.semester == semester
    }

    pub fn item_for(&self, subject_id: i64) -> Option<&FeedbackItem> {
        self.items.iter().find(|item| item.subject_id == subject_id)
    }
}
