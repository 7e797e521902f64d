//! 运行状态、会话开关、重新加载、操作日志与提醒

pub mod activity;
pub mod reload;
pub mod reminders;
pub mod settings;
pub mod status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::stats::requests::StatsParams;
use crate::models::system::requests::UpdateSettingsRequest;
use crate::runtime::AppState;

pub struct SystemService {
    state: Option<Arc<AppState>>,
}

impl SystemService {
    pub fn new_lazy() -> Self {
        Self { state: None }
    }

    pub(crate) fn get_state(&self, request: &HttpRequest) -> Arc<AppState> {
        match &self.state {
            Some(state) => state.clone(),
            None => super::state_from_request(request),
        }
    }

    pub async fn get_status(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        status::get_status(self, request).await
    }

    pub async fn get_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        settings::get_settings(self, request).await
    }

    pub async fn update_settings(
        &self,
        request: &HttpRequest,
        update: UpdateSettingsRequest,
    ) -> ActixResult<HttpResponse> {
        settings::update_settings(self, request, update).await
    }

    pub async fn reload(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        reload::reload(self, request).await
    }

    pub async fn list_activity(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        activity::list_activity(self, request).await
    }

    pub async fn send_reminders(
        &self,
        request: &HttpRequest,
        params: StatsParams,
    ) -> ActixResult<HttpResponse> {
        reminders::send_reminders(self, request, params).await
    }
}
