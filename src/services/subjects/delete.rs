use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::error_response;

/// 删除课程；历史提交中的评分保留，导出时以 `#<id>` 标记
pub async fn delete_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let state = service.get_state(request);

    match state.catalog.delete(subject_id).await {
        Ok(true) => {
            state
                .activity
                .record(format!("Subject {subject_id} removed from catalog"))
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            format!("Subject {subject_id} not found"),
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
