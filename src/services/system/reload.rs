use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SystemService;
use crate::models::ApiResponse;
use crate::utils::error_response;

/// 从远端重新加载课程与提交
pub async fn reload(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let state = service.get_state(request);

    match state.reload().await {
        Ok(result) => {
            let message = if result.reloaded {
                "Data reloaded from remote store"
            } else {
                "Running in local-only mode, nothing to reload"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, message)))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
