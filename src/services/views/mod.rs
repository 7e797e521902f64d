//! 按角色分派的仪表盘

pub mod dashboard;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::views::requests::DashboardParams;
use crate::runtime::AppState;

pub struct ViewService {
    state: Option<Arc<AppState>>,
}

impl ViewService {
    pub fn new_lazy() -> Self {
        Self { state: None }
    }

    pub(crate) fn get_state(&self, request: &HttpRequest) -> Arc<AppState> {
        match &self.state {
            Some(state) => state.clone(),
            None => super::state_from_request(request),
        }
    }

    pub async fn dashboard(
        &self,
        request: &HttpRequest,
        params: DashboardParams,
    ) -> ActixResult<HttpResponse> {
        dashboard::get_dashboard(self, request, params).await
    }
}
