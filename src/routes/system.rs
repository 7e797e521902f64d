use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::stats::requests::StatsParams;
use crate::models::system::requests::UpdateSettingsRequest;
use crate::models::users::entities::UserRole;
use crate::services::SystemService;

// 懒加载的全局 SystemService 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn get_status(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_status(&request).await
}

pub async fn get_settings(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_settings(&request).await
}

pub async fn update_settings(
    request: HttpRequest,
    body: web::Json<UpdateSettingsRequest>,
) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE
        .update_settings(&request, body.into_inner())
        .await
}

pub async fn reload(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.reload(&request).await
}

pub async fn list_activity(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.list_activity(&request).await
}

pub async fn send_reminders(
    request: HttpRequest,
    query: web::Query<StatsParams>,
) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE
        .send_reminders(&request, query.into_inner())
        .await
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            .route("/status", web::get().to(get_status))
            .service(
                web::resource("/settings")
                    .wrap(middlewares::RequireRole::new(UserRole::Admin))
                    .wrap(middlewares::ActingUser)
                    .route(web::get().to(get_settings))
                    .route(web::put().to(update_settings)),
            )
            .service(
                web::resource("/reload")
                    .wrap(middlewares::RequireRole::new(UserRole::Admin))
                    .wrap(middlewares::ActingUser)
                    .route(web::post().to(reload)),
            )
            .service(
                web::resource("/activity")
                    .wrap(middlewares::RequireRole::new(UserRole::Admin))
                    .wrap(middlewares::ActingUser)
                    .route(web::get().to(list_activity)),
            )
            .service(
                web::resource("/reminders")
                    .wrap(middlewares::RequireRole::new_any(&[
                        UserRole::Admin,
                        UserRole::Coordinator,
                    ]))
                    .wrap(middlewares::ActingUser)
                    .route(web::post().to(send_reminders)),
            ),
    );
}
