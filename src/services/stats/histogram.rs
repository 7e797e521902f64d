use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StatsService;
use crate::models::ApiResponse;
use crate::survey::aggregation::rating_histogram;

// 全局分布，不区分专业学期
pub async fn get_histogram(
    service: &StatsService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let state = service.get_state(request);
    let submissions = state.submissions.list().await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        rating_histogram(&submissions),
        "Rating distribution retrieved successfully",
    )))
}
