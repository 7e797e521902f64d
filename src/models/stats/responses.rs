use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Program, Semester};

/// 一条带提交时间的评论
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEntry {
    pub comment: String,
    pub submitted_at: DateTime<Utc>,
}

/// 单门课程的汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    pub subject_id: i64,
    pub code: String,
    pub name: String,
    pub program: Program,
    pub semester: Semester,
    pub teacher_id: i64,
    pub response_count: usize,
    pub average_rating: f64,
    // 两位小数的展示值，如 "4.00"
    pub average_display: String,
    pub comments: Vec<CommentEntry>,
}

/// 全局评分分布（1-5 分）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RatingHistogram {
    pub buckets: [usize; 5],
}

impl RatingHistogram {
    /// 指定评分的次数，超出 1-5 时返回 0
    pub fn count(&self, rating: u8) -> usize {
        match rating {
            1..=5 => self.buckets[(rating - 1) as usize],
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().sum()
    }
}

/// 专业学期内的提交完成度
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub submitted: usize,
    pub total_students: usize,
}

/// 管理员/协调员统计视图
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeStatsResponse {
    pub program: Program,
    pub semester: Semester,
    pub summaries: Vec<SubjectSummary>,
    pub completion: CompletionStats,
}
