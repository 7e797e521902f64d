use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::views::requests::DashboardParams;
use crate::services::ViewService;

// 懒加载的全局 ViewService 实例
static VIEW_SERVICE: Lazy<ViewService> = Lazy::new(ViewService::new_lazy);

pub async fn get_dashboard(
    request: HttpRequest,
    query: web::Query<DashboardParams>,
) -> ActixResult<HttpResponse> {
    VIEW_SERVICE.dashboard(&request, query.into_inner()).await
}

// 配置路由，任意角色均可访问，由服务按角色分派
pub fn configure_view_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dashboard")
            .wrap(middlewares::ActingUser)
            .route("", web::get().to(get_dashboard)),
    );
}
