use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::errors::FeedbackError;
use crate::models::subjects::requests::UpdateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::error_response;

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
    update: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let state = service.get_state(request);

    match state.catalog.update(subject_id, update).await {
        Ok(subject) => {
            state
                .activity
                .record(format!("Subject {} ({}) updated", subject.id, subject.code))
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(subject, "Subject updated successfully")))
        }
        Err(FeedbackError::NotFound(message)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::SubjectNotFound, message))),
        Err(e) => Ok(error_response(&e)),
    }
}
