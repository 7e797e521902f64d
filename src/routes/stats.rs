use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::stats::requests::StatsParams;
use crate::models::users::entities::UserRole;
use crate::services::StatsService;

// 懒加载的全局 StatsService 实例
static STATS_SERVICE: Lazy<StatsService> = Lazy::new(StatsService::new_lazy);

pub async fn get_summary(
    request: HttpRequest,
    query: web::Query<StatsParams>,
) -> ActixResult<HttpResponse> {
    STATS_SERVICE.summary(&request, query.into_inner()).await
}

pub async fn get_histogram(request: HttpRequest) -> ActixResult<HttpResponse> {
    STATS_SERVICE.histogram(&request).await
}

pub async fn export_summary(
    request: HttpRequest,
    query: web::Query<StatsParams>,
) -> ActixResult<HttpResponse> {
    STATS_SERVICE
        .export_summary(&request, query.into_inner())
        .await
}

pub async fn export_submissions(request: HttpRequest) -> ActixResult<HttpResponse> {
    STATS_SERVICE.export_submissions(&request).await
}

// 配置路由
pub fn configure_stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/stats")
            .service(
                web::resource("/submissions/export")
                    .wrap(middlewares::RequireRole::new(UserRole::Admin))
                    .route(web::get().to(export_submissions)),
            )
            .service(
                web::resource("/summary")
                    .wrap(middlewares::RequireRole::new_any(&[
                        UserRole::Admin,
                        UserRole::Coordinator,
                    ]))
                    .route(web::get().to(get_summary)),
            )
            .service(
                web::resource("/summary/export")
                    .wrap(middlewares::RequireRole::new_any(&[
                        UserRole::Admin,
                        UserRole::Coordinator,
                    ]))
                    .route(web::get().to(export_summary)),
            )
            .service(
                web::resource("/histogram")
                    .wrap(middlewares::RequireRole::new_any(&[
                        UserRole::Admin,
                        UserRole::Coordinator,
                    ]))
                    .route(web::get().to(get_histogram)),
            )
            .wrap(middlewares::ActingUser),
    );
}
