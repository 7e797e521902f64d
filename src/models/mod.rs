//! 数据模型定义

pub mod common;
pub mod stats;
pub mod subjects;
pub mod submissions;
pub mod system;
pub mod users;
pub mod views;

pub use common::response::ApiResponse;
pub use common::scope::{Program, Semester, SubmissionKey};

use serde::Serialize;

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    Success = 0,
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1401,
    Forbidden = 1403,
    NotFound = 1404,
    UserNotFound = 1405,
    SubjectNotFound = 2404,
    SubmissionLocked = 3409,
    SubmissionInFlight = 3410,
    SubmissionFailed = 3500,
    DraftNotFound = 3604,
    InternalServerError = 5000,
    ExportFailed = 5010,
    StoreUnavailable = 5503,
}

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
