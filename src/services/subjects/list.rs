use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::ApiResponse;
use crate::models::subjects::requests::SubjectListParams;

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    params: SubjectListParams,
) -> ActixResult<HttpResponse> {
    let state = service.get_state(request);

    let subjects: Vec<_> = state
        .catalog
        .list()
        .await
        .into_iter()
        .filter(|s| params.program.is_none_or(|p| s.program == p))
        .filter(|s| params.semester.is_none_or(|sem| s.semester == sem))
        .filter(|s| params.teacher_id.is_none_or(|t| s.teacher_id == t))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        subjects,
        "Subjects retrieved successfully",
    )))
}
