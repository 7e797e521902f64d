use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FormService;
use crate::models::ApiResponse;
use crate::models::submissions::requests::EditItemRequest;
use crate::survey::workflow;
use crate::utils::error_response;

pub async fn edit_item(
    service: &FormService,
    request: &HttpRequest,
    subject_id: i64,
    edit: EditItemRequest,
) -> ActixResult<HttpResponse> {
    let student = match FormService::acting_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let state = service.get_state(request);

    match workflow::edit_item(&state, student.id, subject_id, edit).await {
        Ok(form) => Ok(HttpResponse::Ok().json(ApiResponse::success(form, "Feedback updated"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn set_anonymous(
    service: &FormService,
    request: &HttpRequest,
    anonymous: bool,
) -> ActixResult<HttpResponse> {
    let student = match FormService::acting_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let state = service.get_state(request);

    match workflow::set_anonymous(&state, student.id, anonymous).await {
        Ok(form) => Ok(HttpResponse::Ok().json(ApiResponse::success(form, "Anonymity updated"))),
        Err(e) => Ok(error_response(&e)),
    }
}
