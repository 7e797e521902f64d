/*!
 * 当前操作用户解析中间件
 *
 * 从 `X-User-Id` 请求头读取用户 ID，在演示用户目录中查找并存入请求扩展，
 * 供视图选择和查询范围使用。这里只做身份选择，不做任何认证。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * web::scope("/api/v1/dashboard")
 *     .wrap(ActingUser)
 *     .route("", web::get().to(get_dashboard))
 * ```
 *
 * 处理程序中通过 `ActingUser::extract_user(&req)` 获取用户。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;
use crate::models::ErrorCode;
use crate::models::users::entities::User;
use crate::runtime::AppState;

pub const ACTING_USER_HEADER: &str = "X-User-Id";

#[derive(Clone)]
pub struct ActingUser;

enum Resolution {
    Found(User),
    Missing,
    Malformed,
    Unknown(i64),
}

fn resolve(req: &ServiceRequest) -> Resolution {
    let Some(raw) = req
        .headers()
        .get(ACTING_USER_HEADER)
        .and_then(|h| h.to_str().ok())
    else {
        return Resolution::Missing;
    };

    let Ok(id) = raw.trim().parse::<i64>() else {
        return Resolution::Malformed;
    };

    let user = req
        .app_data::<web::Data<Arc<AppState>>>()
        .and_then(|state| state.users.get(id).cloned());
    match user {
        Some(user) => Resolution::Found(user),
        None => Resolution::Unknown(id),
    }
}

impl<S, B> Transform<S, ServiceRequest> for ActingUser
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ActingUserMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ActingUserMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ActingUserMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ActingUserMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            let (status, code, message) = match resolve(&req) {
                Resolution::Found(user) => {
                    debug!("Acting as user {} ({})", user.id, user.role);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    return Ok(res);
                }
                Resolution::Missing => (
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    format!("Missing {ACTING_USER_HEADER} header"),
                ),
                Resolution::Malformed => (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::BadRequest,
                    format!("{ACTING_USER_HEADER} must be a numeric user id"),
                ),
                Resolution::Unknown(id) => (
                    StatusCode::NOT_FOUND,
                    ErrorCode::UserNotFound,
                    format!("User {id} not found"),
                ),
            };

            info!("Acting user resolution failed for {}: {}", req.path(), message);
            Ok(req.into_response(
                create_error_response(status, code, &message).map_into_right_body(),
            ))
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl ActingUser {
    /// 从请求扩展中提取当前用户
    /// 此函数应该在应用了 ActingUser 中间件的路由处理程序中使用
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }
}
