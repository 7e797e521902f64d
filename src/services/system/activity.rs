use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SystemService;
use crate::models::ApiResponse;

// 最新在前
pub async fn list_activity(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let state = service.get_state(request);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        state.activity.entries().await,
        "Activity retrieved successfully",
    )))
}
