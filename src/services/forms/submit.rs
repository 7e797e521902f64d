use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FormService;
use crate::models::ApiResponse;
use crate::survey::workflow;
use crate::utils::submit_error_response;

pub async fn submit(service: &FormService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let student = match FormService::acting_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let state = service.get_state(request);

    match workflow::submit(&state, student.id).await {
        Ok(submission) => {
            info!(
                "Feedback locked for student {} ({} {})",
                student.id, submission.program, submission.semester
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                submission,
                "Feedback submitted successfully",
            )))
        }
        Err(e) => Ok(submit_error_response(&e)),
    }
}
