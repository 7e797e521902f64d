use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StatsService, scope_stats};
use crate::models::ApiResponse;
use crate::models::stats::requests::StatsParams;

pub async fn get_summary(
    service: &StatsService,
    request: &HttpRequest,
    params: StatsParams,
) -> ActixResult<HttpResponse> {
    let state = service.get_state(request);
    let stats = scope_stats(&state, params.program, params.semester).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        stats,
        "Statistics retrieved successfully",
    )))
}
