use serde::Serialize;

use crate::models::stats::responses::{RatingHistogram, ScopeStatsResponse, SubjectSummary};
use crate::models::subjects::entities::Subject;
use crate::models::submissions::responses::StudentFormView;
use crate::models::users::entities::User;
use crate::survey::SurveySettings;

/// 按角色分派的仪表盘
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DashboardView {
    Admin(AdminView),
    Coordinator(CoordinatorView),
    Teacher(TeacherView),
    Student(StudentView),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminView {
    pub user: User,
    pub settings: SurveySettings,
    pub catalog: Vec<Subject>,
    pub stats: ScopeStatsResponse,
    pub histogram: RatingHistogram,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatorView {
    pub user: User,
    pub stats: ScopeStatsResponse,
    pub histogram: RatingHistogram,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherView {
    pub user: User,
    pub summaries: Vec<SubjectSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentView {
    pub user: User,
    pub form: StudentFormView,
}
