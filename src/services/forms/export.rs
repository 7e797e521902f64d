use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FormService;
use crate::utils::error_response;
use crate::utils::export::{csv_attachment, submissions_csv};

/// 导出本人的全部提交
pub async fn export_own(service: &FormService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let student = match FormService::acting_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let state = service.get_state(request);

    let submissions = state.submissions.for_student(student.id).await;
    let subjects = state.catalog.list().await;

    match submissions_csv(&submissions, &subjects, true) {
        Ok(data) => Ok(csv_attachment(
            &format!("feedback_{}.csv", student.id),
            data,
        )),
        Err(e) => Ok(error_response(&e)),
    }
}
