use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::subjects::requests::{
    CreateSubjectRequest, SubjectListParams, UpdateSubjectRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::SubjectService;

// 懒加载的全局 SubjectService 实例
static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

pub async fn list_subjects(
    request: HttpRequest,
    query: web::Query<SubjectListParams>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .list_subjects(&request, query.into_inner())
        .await
}

pub async fn create_subject(
    request: HttpRequest,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .create_subject(&request, body.into_inner())
        .await
}

pub async fn update_subject(
    request: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .update_subject(&request, path.into_inner(), body.into_inner())
        .await
}

pub async fn delete_subject(
    request: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .delete_subject(&request, path.into_inner())
        .await
}

// 配置路由
pub fn configure_subject_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subjects")
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .route(web::get().to(list_subjects)),
            )
            .service(
                web::resource("")
                    .guard(guard::Post())
                    .wrap(middlewares::RequireRole::new(UserRole::Admin))
                    .route(web::post().to(create_subject)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(middlewares::RequireRole::new(UserRole::Admin))
                    .route(web::put().to(update_subject))
                    .route(web::delete().to(delete_subject)),
            )
            .wrap(middlewares::ActingUser),
    );
}
