//! 学生问卷服务

pub mod drafts;
pub mod edit;
pub mod export;
pub mod open;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::ActingUser;
use crate::models::submissions::requests::{EditItemRequest, FormParams};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::runtime::AppState;

pub struct FormService {
    state: Option<Arc<AppState>>,
}

impl FormService {
    pub fn new_lazy() -> Self {
        Self { state: None }
    }

    pub(crate) fn get_state(&self, request: &HttpRequest) -> Arc<AppState> {
        match &self.state {
            Some(state) => state.clone(),
            None => super::state_from_request(request),
        }
    }

    pub(crate) fn acting_user(request: &HttpRequest) -> Result<User, HttpResponse> {
        ActingUser::extract_user(request).ok_or_else(|| {
            HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Acting user required",
            ))
        })
    }

    // 打开或切换学期
    pub async fn open_form(
        &self,
        request: &HttpRequest,
        params: FormParams,
    ) -> ActixResult<HttpResponse> {
        open::open_form(self, request, params).await
    }

    pub async fn current_form(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        open::current_form(self, request).await
    }

    pub async fn edit_item(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        edit: EditItemRequest,
    ) -> ActixResult<HttpResponse> {
        edit::edit_item(self, request, subject_id, edit).await
    }

    pub async fn set_anonymous(
        &self,
        request: &HttpRequest,
        anonymous: bool,
    ) -> ActixResult<HttpResponse> {
        edit::set_anonymous(self, request, anonymous).await
    }

    pub async fn submit(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        submit::submit(self, request).await
    }

    pub async fn save_draft(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        drafts::save_draft(self, request).await
    }

    pub async fn load_draft(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        drafts::load_draft(self, request).await
    }

    pub async fn export_own(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        export::export_own(self, request).await
    }
}
