use serde::Deserialize;

use crate::models::{Program, Semester};

/// 创建课程请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectRequest {
    pub code: String,
    pub name: String,
    pub program: Program,
    pub semester: Semester,
    pub teacher_id: i64,
}

/// 更新课程请求，未提供的字段保持不变
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubjectRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub program: Option<Program>,
    pub semester: Option<Semester>,
    pub teacher_id: Option<i64>,
}

/// 课程列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectListParams {
    pub program: Option<Program>,
    pub semester: Option<Semester>,
    pub teacher_id: Option<i64>,
}
