//! 统计与导出服务（管理员/协调员）

pub mod export;
pub mod histogram;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::stats::requests::StatsParams;
use crate::models::stats::responses::ScopeStatsResponse;
use crate::models::{Program, Semester};
use crate::runtime::AppState;
use crate::survey::aggregation;

pub struct StatsService {
    state: Option<Arc<AppState>>,
}

impl StatsService {
    pub fn new_lazy() -> Self {
        Self { state: None }
    }

    pub(crate) fn get_state(&self, request: &HttpRequest) -> Arc<AppState> {
        match &self.state {
            Some(state) => state.clone(),
            None => super::state_from_request(request),
        }
    }

    pub async fn summary(
        &self,
        request: &HttpRequest,
        params: StatsParams,
    ) -> ActixResult<HttpResponse> {
        summary::get_summary(self, request, params).await
    }

    pub async fn histogram(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        histogram::get_histogram(self, request).await
    }

    pub async fn export_summary(
        &self,
        request: &HttpRequest,
        params: StatsParams,
    ) -> ActixResult<HttpResponse> {
        export::export_summary(self, request, params).await
    }

    pub async fn export_submissions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        export::export_submissions(self, request).await
    }
}

/// 专业学期内的课程汇总与完成度
pub(crate) async fn scope_stats(
    state: &AppState,
    program: Program,
    semester: Semester,
) -> ScopeStatsResponse {
    let subjects = state.catalog.list().await;
    let submissions = state.submissions.list().await;

    ScopeStatsResponse {
        program,
        semester,
        summaries: aggregation::summarize_scope(
            &subjects,
            &submissions,
            program,
            semester,
            state.max_comments,
        ),
        completion: aggregation::completion(state.users.all(), &submissions, program, semester),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subjects::requests::CreateSubjectRequest;
    use crate::models::users::entities::UserRole;
    use crate::runtime::state::test_support::state_with;
    use crate::storage::Backend;

    #[tokio::test]
    async fn test_scope_stats_counts_students_without_submissions() {
        let state = state_with(Backend::LocalOnly);
        state
            .catalog
            .create(CreateSubjectRequest {
                code: "FIN101".to_string(),
                name: "Corporate Finance".to_string(),
                program: Program::Mba,
                semester: Semester::I,
                teacher_id: 10,
            })
            .await
            .unwrap();

        let stats = scope_stats(&state, Program::Mba, Semester::I).await;
        assert_eq!(stats.summaries.len(), 1);
        assert_eq!(stats.summaries[0].response_count, 0);
        assert_eq!(stats.summaries[0].average_display, "0.00");
        assert_eq!(stats.completion.submitted, 0);
        let expected = state
            .users
            .by_role(UserRole::Student)
            .into_iter()
            .filter(|u| u.program == Some(Program::Mba) && u.semester == Some(Semester::I))
            .count();
        assert_eq!(stats.completion.total_students, expected);
    }
}
