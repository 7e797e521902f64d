use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FormService;
use crate::models::ApiResponse;
use crate::models::submissions::requests::FormParams;
use crate::survey::workflow;
use crate::utils::error_response;

pub async fn open_form(
    service: &FormService,
    request: &HttpRequest,
    params: FormParams,
) -> ActixResult<HttpResponse> {
    let student = match FormService::acting_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let state = service.get_state(request);

    match workflow::open_form(&state, &student, params.semester).await {
        Ok(form) => Ok(HttpResponse::Ok().json(ApiResponse::success(form, "Form opened"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn current_form(
    service: &FormService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let student = match FormService::acting_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let state = service.get_state(request);

    match workflow::current_form(&state, student.id).await {
        Ok(form) => Ok(HttpResponse::Ok().json(ApiResponse::success(form, "Form retrieved"))),
        Err(e) => Ok(error_response(&e)),
    }
}
