//! 演示用户列表，用于前端切换当前用户

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::state_from_request;
use crate::models::ApiResponse;

pub struct UserService;

impl UserService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn list_users(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let state = state_from_request(request);
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            state.users.all().to_vec(),
            "Users retrieved successfully",
        )))
    }
}
