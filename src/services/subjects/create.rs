use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::ApiResponse;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::utils::error_response;

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let state = service.get_state(request);

    // teacherId 为软引用，不检查是否存在
    match state.catalog.create(subject).await {
        Ok(subject) => {
            info!("Subject {} ({}) created", subject.id, subject.code);
            state
                .activity
                .record(format!(
                    "Subject {} added to {} {}",
                    subject.code, subject.program, subject.semester
                ))
                .await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
