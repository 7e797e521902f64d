//! 业务错误到 HTTP 响应的映射

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use tracing::error;

use crate::errors::FeedbackError;
use crate::models::{ApiResponse, ErrorCode};

fn classify(err: &FeedbackError) -> (StatusCode, ErrorCode) {
    match err {
        FeedbackError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed),
        FeedbackError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
        FeedbackError::EditLocked(_) => (StatusCode::CONFLICT, ErrorCode::SubmissionLocked),
        FeedbackError::InFlight(_) => (StatusCode::CONFLICT, ErrorCode::SubmissionInFlight),
        FeedbackError::StoreUnavailable(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::StoreUnavailable)
        }
        FeedbackError::RemoteConnection(_) | FeedbackError::RemoteOperation(_) => {
            (StatusCode::BAD_GATEWAY, ErrorCode::InternalServerError)
        }
        FeedbackError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::ExportFailed),
        FeedbackError::CacheConnection(_)
        | FeedbackError::CachePluginNotFound(_)
        | FeedbackError::RemoteConfig(_)
        | FeedbackError::Serialization(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
        ),
    }
}

/// 通用映射；远端故障只返回概括信息，细节写入日志
pub fn error_response(err: &FeedbackError) -> HttpResponse {
    let (status, code) = classify(err);
    let message = if err.is_remote() {
        error!("Remote store failure: {}", err);
        "Remote store request failed".to_string()
    } else {
        err.message().to_string()
    };
    HttpResponse::build(status).json(ApiResponse::error_empty(code, message))
}

/// 锁定提交专用：远端故障统一显示为“提交失败”
pub fn submit_error_response(err: &FeedbackError) -> HttpResponse {
    if err.is_remote() {
        return HttpResponse::BadGateway().json(ApiResponse::error_empty(
            ErrorCode::SubmissionFailed,
            "Failed to submit feedback. Please try again later.",
        ));
    }
    error_response(err)
}
