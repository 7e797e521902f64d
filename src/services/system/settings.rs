use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SystemService;
use crate::models::ApiResponse;
use crate::models::system::requests::UpdateSettingsRequest;

/// 当前会话开关
pub async fn get_settings(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let state = service.get_state(request);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        state.settings().await,
        "Settings retrieved successfully",
    )))
}

/// 更新会话开关，仅对之后的操作生效
pub async fn update_settings(
    service: &SystemService,
    request: &HttpRequest,
    update: UpdateSettingsRequest,
) -> ActixResult<HttpResponse> {
    let state = service.get_state(request);
    let settings = state.update_settings(&update).await;

    info!(
        "Survey settings updated: allow_anonymous={}, disable_edits_after_submit={}",
        settings.allow_anonymous, settings.disable_edits_after_submit
    );
    state
        .activity
        .record(format!(
            "Settings updated (anonymous {}, edits after submit {})",
            if settings.allow_anonymous { "allowed" } else { "disabled" },
            if settings.disable_edits_after_submit { "disabled" } else { "allowed" },
        ))
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        settings,
        "Settings updated successfully",
    )))
}
