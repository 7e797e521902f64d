use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::UserService;

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

pub async fn list_users(request: HttpRequest) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(&request).await
}

// 配置路由；切换当前用户前需要先拿到列表，因此不要求 X-User-Id
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/users").route("", web::get().to(list_users)));
}
