use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ViewService;
use crate::errors::Result;
use crate::middlewares::ActingUser;
use crate::models::users::entities::{User, UserRole};
use crate::models::views::requests::DashboardParams;
use crate::models::views::responses::{
    AdminView, CoordinatorView, DashboardView, StudentView, TeacherView,
};
use crate::models::{ApiResponse, ErrorCode, Program, Semester};
use crate::runtime::AppState;
use crate::services::stats::scope_stats;
use crate::survey::{aggregation, workflow};
use crate::utils::error_response;

pub async fn get_dashboard(
    service: &ViewService,
    request: &HttpRequest,
    params: DashboardParams,
) -> ActixResult<HttpResponse> {
    let user = match ActingUser::extract_user(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Acting user required",
            )));
        }
    };
    let state = service.get_state(request);

    match build_view(&state, user, params).await {
        Ok(view) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            view,
            "Dashboard retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub(crate) async fn build_view(
    state: &AppState,
    user: User,
    params: DashboardParams,
) -> Result<DashboardView> {
    // 未指定时默认展示 MBA 第 I 学期
    let program = params.program.unwrap_or(Program::Mba);
    let semester = params.semester.unwrap_or(Semester::I);

    let view = match user.role {
        UserRole::Admin => {
            let submissions = state.submissions.list().await;
            DashboardView::Admin(AdminView {
                settings: state.settings().await,
                catalog: state.catalog.list().await,
                stats: scope_stats(state, program, semester).await,
                histogram: aggregation::rating_histogram(&submissions),
                user,
            })
        }
        UserRole::Coordinator => {
            let submissions = state.submissions.list().await;
            DashboardView::Coordinator(CoordinatorView {
                stats: scope_stats(state, program, semester).await,
                histogram: aggregation::rating_histogram(&submissions),
                user,
            })
        }
        UserRole::Teacher => {
            let subjects = state.catalog.list().await;
            let submissions = state.submissions.list().await;
            DashboardView::Teacher(TeacherView {
                summaries: aggregation::summarize_teacher(
                    user.id,
                    &subjects,
                    &submissions,
                    state.max_comments,
                ),
                user,
            })
        }
        UserRole::Student => {
            let form = workflow::open_form(state, &user, params.semester).await?;
            DashboardView::Student(StudentView { user, form })
        }
    };
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subjects::requests::CreateSubjectRequest;
    use crate::runtime::state::test_support::state_with;
    use crate::storage::Backend;

    async fn seed(state: &AppState) {
        for (code, teacher_id) in [("FIN101", 10), ("MKT102", 11)] {
            state
                .catalog
                .create(CreateSubjectRequest {
                    code: code.to_string(),
                    name: format!("{code} course"),
                    program: Program::Mba,
                    semester: Semester::I,
                    teacher_id,
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_teacher_sees_only_own_subjects() {
        let state = state_with(Backend::LocalOnly);
        seed(&state).await;
        let teacher = state.users.get(10).unwrap().clone();

        let view = build_view(&state, teacher, DashboardParams::default())
            .await
            .unwrap();
        match view {
            DashboardView::Teacher(view) => {
                assert_eq!(view.summaries.len(), 1);
                assert_eq!(view.summaries[0].code, "FIN101");
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_student_view_opens_form_for_own_scope() {
        let state = state_with(Backend::LocalOnly);
        seed(&state).await;
        let student = state.users.get(101).unwrap().clone();

        let view = build_view(&state, student, DashboardParams::default())
            .await
            .unwrap();
        match view {
            DashboardView::Student(view) => {
                assert_eq!(view.user.id, 101);
                assert_eq!(view.form.rows.len(), 2);
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_admin_view_defaults_to_first_mba_semester() {
        let state = state_with(Backend::LocalOnly);
        seed(&state).await;
        let admin = state.users.get(1).unwrap().clone();

        let view = build_view(&state, admin, DashboardParams::default())
            .await
            .unwrap();
        match view {
            DashboardView::Admin(view) => {
                assert_eq!(view.stats.program, Program::Mba);
                assert_eq!(view.stats.semester, Semester::I);
                assert_eq!(view.catalog.len(), 2);
                assert_eq!(view.histogram.total(), 0);
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }
}
