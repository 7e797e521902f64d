use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SystemService;
use crate::models::ApiResponse;
use crate::models::stats::requests::StatsParams;
use crate::models::system::responses::ReminderResponse;
use crate::survey::aggregation::pending_students;

/// 提醒尚未提交的学生；只写日志与操作记录，不发送任何消息
pub async fn send_reminders(
    service: &SystemService,
    request: &HttpRequest,
    params: StatsParams,
) -> ActixResult<HttpResponse> {
    let state = service.get_state(request);
    let submissions = state.submissions.list().await;

    let pending: Vec<_> = pending_students(
        state.users.all(),
        &submissions,
        params.program,
        params.semester,
    )
    .into_iter()
    .cloned()
    .collect();

    for student in &pending {
        info!(
            target: "reminder",
            "Reminder queued for {} <{}> ({} {})",
            student.name, student.email, params.program, params.semester
        );
        state
            .activity
            .record(format!(
                "Reminder sent to {} for {} {}",
                student.name, params.program, params.semester
            ))
            .await;
    }

    let count = pending.len();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ReminderResponse {
            program: params.program,
            semester: params.semester,
            reminded: pending,
        },
        format!("{count} reminder(s) sent"),
    )))
}
