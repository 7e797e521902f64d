use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::{AnonymousRequest, EditItemRequest, FormParams};
use crate::models::users::entities::UserRole;
use crate::services::FormService;

// 懒加载的全局 FormService 实例
static FORM_SERVICE: Lazy<FormService> = Lazy::new(FormService::new_lazy);

pub async fn open_form(
    request: HttpRequest,
    query: web::Query<FormParams>,
) -> ActixResult<HttpResponse> {
    FORM_SERVICE.open_form(&request, query.into_inner()).await
}

pub async fn current_form(request: HttpRequest) -> ActixResult<HttpResponse> {
    FORM_SERVICE.current_form(&request).await
}

pub async fn edit_item(
    request: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<EditItemRequest>,
) -> ActixResult<HttpResponse> {
    FORM_SERVICE
        .edit_item(&request, path.into_inner(), body.into_inner())
        .await
}

pub async fn set_anonymous(
    request: HttpRequest,
    body: web::Json<AnonymousRequest>,
) -> ActixResult<HttpResponse> {
    FORM_SERVICE
        .set_anonymous(&request, body.into_inner().anonymous)
        .await
}

pub async fn submit(request: HttpRequest) -> ActixResult<HttpResponse> {
    FORM_SERVICE.submit(&request).await
}

pub async fn save_draft(request: HttpRequest) -> ActixResult<HttpResponse> {
    FORM_SERVICE.save_draft(&request).await
}

pub async fn load_draft(request: HttpRequest) -> ActixResult<HttpResponse> {
    FORM_SERVICE.load_draft(&request).await
}

pub async fn export_own(request: HttpRequest) -> ActixResult<HttpResponse> {
    FORM_SERVICE.export_own(&request).await
}

// 配置路由，仅学生可用
pub fn configure_form_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/form")
            .wrap(middlewares::RequireRole::new(UserRole::Student))
            .wrap(middlewares::ActingUser)
            .route("", web::get().to(open_form))
            .route("/current", web::get().to(current_form))
            .route("/items/{subject_id}", web::put().to(edit_item))
            .route("/anonymous", web::put().to(set_anonymous))
            .route("/submit", web::post().to(submit))
            .route("/draft", web::post().to(save_draft))
            .route("/draft/load", web::post().to(load_draft))
            .route("/export", web::get().to(export_own)),
    );
}
