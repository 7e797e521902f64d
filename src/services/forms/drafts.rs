use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FormService;
use crate::errors::FeedbackError;
use crate::models::{ApiResponse, ErrorCode};
use crate::survey::workflow;
use crate::utils::error_response;

pub async fn save_draft(service: &FormService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let student = match FormService::acting_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let state = service.get_state(request);

    match workflow::save_draft(&state, student.id).await {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot, "Draft saved"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn load_draft(service: &FormService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let student = match FormService::acting_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let state = service.get_state(request);

    match workflow::load_draft(&state, student.id).await {
        Ok(form) => Ok(HttpResponse::Ok().json(ApiResponse::success(form, "Draft restored"))),
        Err(FeedbackError::NotFound(message)) if message.contains("draft") => Ok(
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::DraftNotFound, message)),
        ),
        Err(e) => Ok(error_response(&e)),
    }
}
