use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::system::responses::StatusResponse;
use crate::models::{ApiResponse, AppStartTime};

/// 运行状态，无需指定当前用户
pub async fn get_status(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let state = service.get_state(request);

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or_default();

    let response = StatusResponse {
        system_name: state.system_name.clone(),
        backend: state.backend.mode(),
        subjects: state.catalog.len().await,
        submissions: state.submissions.len().await,
        uptime_seconds,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Status retrieved successfully",
    )))
}
