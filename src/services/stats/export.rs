use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{StatsService, scope_stats};
use crate::models::stats::requests::StatsParams;
use crate::utils::error_response;
use crate::utils::export::{csv_attachment, submissions_csv, summaries_csv};

pub async fn export_summary(
    service: &StatsService,
    request: &HttpRequest,
    params: StatsParams,
) -> ActixResult<HttpResponse> {
    let state = service.get_state(request);
    let stats = scope_stats(&state, params.program, params.semester).await;

    match summaries_csv(&stats.summaries) {
        Ok(data) => Ok(csv_attachment(
            &format!("summary_{}_{}.csv", params.program, params.semester),
            data,
        )),
        Err(e) => {
            error!("Failed to export summary: {}", e);
            Ok(error_response(&e))
        }
    }
}

/// 全量提交导出，匿名提交不暴露学生 ID
pub async fn export_submissions(
    service: &StatsService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let state = service.get_state(request);
    let submissions = state.submissions.list().await;
    let subjects = state.catalog.list().await;

    match submissions_csv(&submissions, &subjects, false) {
        Ok(data) => Ok(csv_attachment("submissions.csv", data)),
        Err(e) => {
            error!("Failed to export submissions: {}", e);
            Ok(error_response(&e))
        }
    }
}
