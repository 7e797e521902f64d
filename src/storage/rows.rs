//! 远端存储的行结构
//!
//! 行字段使用 snake_case（如 `teacher_id`），内存模型对外序列化为 camelCase（如 `teacherId`），
//! 两者之间的转换由 `CatalogStore` / `SubmissionStore` 负责。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRow {
    // 插入前为空，由远端分配
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    pub program: String,
    pub semester: String,
    pub teacher_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRow {
    pub id: Option<i64>,
    pub student_id: i64,
    pub program: String,
    pub semester: String,
    pub anonymous: bool,
    pub submitted_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItemRow {
    pub id: Option<i64>,
    pub submission_id: i64,
    pub subject_id: i64,
    pub rating: i16,
    pub comment: Option<String>,
}
