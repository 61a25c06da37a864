/*!
 * JWT 认证中间件
 *
 * 验证 `Authorization: Bearer <JWT>`，并把调用者（[`Actor`]）写入请求扩展。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new().service(
 *     web::scope("/api/v1/assignments")
 *         .wrap(RequireJWT)
 *         .route("", web::get().to(list_assignments)),
 * );
 *
 * async fn list_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
 *     let actor = RequireJWT::extract_actor(&req);
 *     // ...
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 令牌由外部身份服务签发，`sub` 为用户 ID，`role` 为 `guru` 或 `siswa`
 * 2. 校验签名、过期时间与令牌类型
 * 3. 按 ID 读取用户资料（先查缓存，再查存储）；首次登录尚无资料时 `profile` 为空
 * 4. 资料中的角色必须与令牌一致
 */

use crate::cache::{self, ObjectCache};
use crate::config::AppConfig;
use crate::grading::GradingWorkflow;
use crate::models::ErrorCode;
use crate::models::profiles::entities::{Actor, Profile, UserRole};
use crate::utils::jwt::JwtUtils;
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
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

enum AuthFailure {
    Unauthorized(String),
    Unavailable(String),
}

// 提取令牌中的用户 ID 与角色
fn extract_identity(req: &ServiceRequest) -> Result<(i64, UserRole), AuthFailure> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| {
            AuthFailure::Unauthorized("Missing or invalid Authorization header".to_string())
        })?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Unauthorized("Invalid JWT token".to_string())
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| AuthFailure::Unauthorized("Invalid user ID in JWT".to_string()))?;
    let role = claims
        .user_role()
        .ok_or_else(|| AuthFailure::Unauthorized("Invalid role in JWT".to_string()))?;
    Ok((user_id, role))
}

// 读取用户资料：缓存命中直接返回，否则查存储并回填缓存
async fn load_profile(req: &ServiceRequest, user_id: i64) -> Result<Option<Profile>, AuthFailure> {
    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());

    if let Some(cache) = &cache
        && let Some(profile) = cache::cached_profile(cache.as_ref(), user_id).await
    {
        return Ok(Some(profile));
    }

    let workflow = req
        .app_data::<web::Data<GradingWorkflow>>()
        .ok_or_else(|| AuthFailure::Unavailable("Workflow not found in app data".to_string()))?;
    let profile = workflow
        .storage()
        .get_profile_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to load profile {}: {}", user_id, e);
            AuthFailure::Unavailable("Failed to retrieve profile from storage".to_string())
        })?;

    if let (Some(cache), Some(profile)) = (&cache, &profile) {
        cache::insert_json(
            cache.as_ref(),
            cache::profile_key(user_id),
            profile,
            AppConfig::get().cache.default_ttl,
        )
        .await;
    }
    Ok(profile)
}

async fn authenticate(req: &ServiceRequest) -> Result<Actor, AuthFailure> {
    let (id, role) = extract_identity(req)?;
    let profile = load_profile(req, id).await?;

    if let Some(profile) = &profile
        && profile.role != role
    {
        return Err(AuthFailure::Unauthorized(format!(
            "Role mismatch: token says {role}, profile says {}",
            profile.role
        )));
    }

    Ok(Actor { id, role, profile })
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
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
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                Ok(actor) => {
                    debug!(
                        "JWT authentication successful for ID: {} ({})",
                        actor.id, actor.role
                    );
                    req.extensions_mut().insert(actor);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(AuthFailure::Unauthorized(err)) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(AuthFailure::Unavailable(err)) => Ok(req.into_response(
                    create_error_response(
                        StatusCode::SERVICE_UNAVAILABLE,
                        ErrorCode::StorageUnavailable,
                        &err,
                    )
                    .map_into_right_body(),
                )),
            }
        })
    }
}

// 辅助函数：从请求中提取调用者信息
impl RequireJWT {
    /// 从请求扩展中提取调用者
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_actor(req: &actix_web::HttpRequest) -> Option<Actor> {
        req.extensions().get::<Actor>().cloned()
    }
}
