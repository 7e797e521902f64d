use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::submissions::entities::FeedbackItem;
use crate::models::{Program, Semester};
use crate::survey::LifecycleState;

/// 学生问卷中的一行
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRow {
    pub subject_id: i64,
    pub code: String,
    pub name: String,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// 学生问卷视图
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFormView {
    pub program: Program,
    pub semester: Semester,
    pub state: LifecycleState,
    pub editable: bool,
    pub anonymous: bool,
    pub anonymous_allowed: bool,
    pub remaining: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    pub rows: Vec<FormRow>,
}

/// 保存在快照缓存中的草稿
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    pub items: Vec<FeedbackItem>,
    pub anonymous: bool,
    pub saved_at: DateTime<Utc>,
}
