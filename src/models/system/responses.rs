use serde::Serialize;

use crate::models::users::entities::User;
use crate::models::{Program, Semester};

/// 运行状态
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub system_name: String,
    pub backend: &'static str,
    pub subjects: usize,
    pub submissions: usize,
    pub uptime_seconds: i64,
}

/// 提醒结果；提醒只记录日志，不会真正发送
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub program: Program,
    pub semester: Semester,
    pub reminded: Vec<User>,
}

/// 重新加载结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadResponse {
    pub reloaded: bool,
    pub subjects: usize,
    pub submissions: usize,
}

/// 一条操作日志
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub at: chrono::DateTime<chrono::Utc>,
    pub message: String,
}
