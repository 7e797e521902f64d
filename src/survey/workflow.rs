//! 学生问卷流程
//!
//! 串联草稿注册表、课程目录、提交存储与快照缓存。锁定流程：
//! 防重入 -> 按当前开关检查已有提交 -> 与最新课程范围对齐 -> 完整性校验 ->
//! 写入远端 -> 本地进入 `Locked`。任一步失败都不会改变已存储的提交。

use tracing::{error, info};

use crate::errors::{FeedbackError, Result};
use crate::models::subjects::entities::Subject;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::EditItemRequest;
use crate::models::submissions::responses::{DraftSnapshot, FormRow, StudentFormView};
use crate::models::users::entities::{User, UserRole};
use crate::models::{Semester, SubmissionKey};
use crate::runtime::AppState;
use crate::survey::{DraftSession, SurveySettings};

/// 打开（或切换到）学生某学期的问卷；未指定学期时使用学生当前学期
pub async fn open_form(
    state: &AppState,
    student: &User,
    semester: Option<Semester>,
) -> Result<StudentFormView> {
    let key = student_key(student, semester)?;
    let scope = state.catalog.in_scope(key.program, key.semester).await;
    let existing = state.submissions.find(&key).await;

    let session = state.drafts.open(key, &scope, existing.as_ref());
    let settings = state.settings().await;
    Ok(build_form_view(&session, &scope, settings))
}

/// 当前打开的问卷
pub async fn current_form(state: &AppState, student_id: i64) -> Result<StudentFormView> {
    let session = active_session(state, student_id)?;
    render(state, &session).await
}

pub async fn edit_item(
    state: &AppState,
    student_id: i64,
    subject_id: i64,
    edit: EditItemRequest,
) -> Result<StudentFormView> {
    if edit.rating.is_none() && edit.comment.is_none() {
        return Err(FeedbackError::validation("Nothing to update"));
    }
    let policy = state.settings().await.edit_policy();

    let session = state.drafts.update(student_id, |session| {
        if let Some(rating) = edit.rating {
            session.set_rating(subject_id, rating, policy)?;
        }
        if edit.comment.is_some() {
            session.set_comment(subject_id, edit.comment, policy)?;
        }
        Ok(session.clone())
    })?;
    render(state, &session).await
}

pub async fn set_anonymous(
    state: &AppState,
    student_id: i64,
    anonymous: bool,
) -> Result<StudentFormView> {
    let settings = state.settings().await;
    let session = state.drafts.update(student_id, |session| {
        session.set_anonymous(anonymous, settings.allow_anonymous, settings.edit_policy())?;
        Ok(session.clone())
    })?;
    render(state, &session).await
}

/// 锁定当前问卷并写入存储
pub async fn submit(state: &AppState, student_id: i64) -> Result<Submission> {
    let key = active_session(state, student_id)?.key();
    let _guard = state.gate.acquire(key)?;

    let settings = state.settings().await;
    let policy = settings.edit_policy();

    // 以存储为准：其他会话或重新加载可能已经带来了提交
    let existing = state.submissions.find(&key).await;
    if existing.is_some() && !policy.allows_resubmit() {
        return Err(FeedbackError::edit_locked(
            "Feedback already submitted for this semester",
        ));
    }

    let scope = state.catalog.in_scope(key.program, key.semester).await;
    let mut request = state.drafts.update(student_id, |session| {
        if session.key() != key {
            return Err(FeedbackError::in_flight(
                "The open form changed while submitting",
            ));
        }
        session.sync_scope(&scope);
        session.prepare_lock(policy)
    })?;
    request.anonymous = request.anonymous && settings.allow_anonymous;

    let submission = match state.submissions.persist(request, existing.as_ref()).await {
        Ok(submission) => submission,
        Err(e) => {
            error!(
                "Failed to store feedback of student {} for {} {}: {}",
                key.student_id, key.program, key.semester, e
            );
            return Err(e);
        }
    };

    state.drafts.update(student_id, |session| {
        if session.key() == key {
            session.mark_locked(&submission);
        }
        Ok(())
    })?;
    state.snapshots.discard(&key).await;

    let who = if submission.anonymous {
        "Anonymous student".to_string()
    } else {
        format!("Student {}", submission.student_id)
    };
    let verb = if existing.is_some() { "resubmitted" } else { "submitted" };
    state
        .activity
        .record(format!(
            "{who} {verb} feedback for {} {} ({} subject(s))",
            submission.program,
            submission.semester,
            submission.items.len()
        ))
        .await;

    Ok(submission)
}

/// 保存“稍后继续”快照
pub async fn save_draft(state: &AppState, student_id: i64) -> Result<DraftSnapshot> {
    let session = active_session(state, student_id)?;
    let policy = state.settings().await.edit_policy();
    if !session.is_editable(policy) {
        return Err(FeedbackError::edit_locked(
            "Feedback already submitted; edits are disabled",
        ));
    }

    let snapshot = state.snapshots.save(&session).await?;
    info!(
        "Saved draft for student {} ({} {}) in {} cache",
        student_id,
        session.key().program,
        session.key().semester,
        state.snapshots.backend_name()
    );
    Ok(snapshot)
}

/// 显式读取快照并覆盖当前问卷
pub async fn load_draft(state: &AppState, student_id: i64) -> Result<StudentFormView> {
    let key = active_session(state, student_id)?.key();
    let snapshot = state
        .snapshots
        .load(&key)
        .await?
        .ok_or_else(|| FeedbackError::not_found("No saved draft for this semester"))?;

    let settings = state.settings().await;
    let session = state.drafts.update(student_id, |session| {
        session.restore(
            &snapshot.items,
            snapshot.anonymous && settings.allow_anonymous,
            settings.edit_policy(),
        )?;
        Ok(session.clone())
    })?;
    render(state, &session).await
}

/// 组装问卷视图；行顺序与课程目录一致
pub fn build_form_view(
    session: &DraftSession,
    scope: &[Subject],
    settings: SurveySettings,
) -> StudentFormView {
    let key = session.key();
    let rows = session
        .items()
        .iter()
        .map(|item| {
            let subject = scope.iter().find(|s| s.id == item.subject_id);
            FormRow {
                subject_id: item.subject_id,
                code: subject
                    .map(|s| s.code.clone())
                    .unwrap_or_else(|| format!("#{}", item.subject_id)),
                name: subject.map(|s| s.name.clone()).unwrap_or_default(),
                rating: item.rating,
                comment: item.comment.clone(),
            }
        })
        .collect();

    StudentFormView {
        program: key.program,
        semester: key.semester,
        state: session.state(),
        editable: session.is_editable(settings.edit_policy()),
        anonymous: session.anonymous(),
        anonymous_allowed: settings.allow_anonymous,
        remaining: session.remaining(),
        submitted_at: session.submitted_at(),
        rows,
    }
}

fn student_key(student: &User, semester: Option<Semester>) -> Result<SubmissionKey> {
    if student.role != UserRole::Student {
        return Err(FeedbackError::validation(
            "Only students can fill in feedback forms",
        ));
    }
    let program = student
        .program
        .ok_or_else(|| FeedbackError::validation("Student has no program assigned"))?;
    let semester = semester
        .or(student.semester)
        .ok_or_else(|| FeedbackError::validation("Student has no semester assigned"))?;
    Ok(SubmissionKey::new(student.id, program, semester))
}

fn active_session(state: &AppState, student_id: i64) -> Result<DraftSession> {
    state
        .drafts
        .get(student_id)
        .ok_or_else(|| FeedbackError::not_found("No feedback form is open"))
}

async fn render(state: &AppState, session: &DraftSession) -> Result<StudentFormView> {
    let key = session.key();
    let scope = state.catalog.in_scope(key.program, key.semester).await;
    Ok(build_form_view(session, &scope, state.settings().await))
}
