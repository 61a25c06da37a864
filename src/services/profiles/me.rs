use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use super::ProfileService;
use crate::cache::{self, ObjectCache};
use crate::models::{ApiResponse, ErrorCode};
use crate::models::profiles::requests::UpdateProfileRequest;
use crate::services::{context, error_response};

/// GET /profiles/me
pub async fn get_me(service: &ProfileService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let (_, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    match actor.profile {
        Some(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "Berhasil"))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProfileIncomplete,
            "Profil belum dilengkapi",
        ))),
    }
}

/// PUT /profiles/me
pub async fn update_me(
    service: &ProfileService,
    request: &HttpRequest,
    req: UpdateProfileRequest,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    match workflow.update_profile(&actor, req).await {
        Ok(profile) => {
            if let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
                cache::invalidate_profile(cache.get_ref().as_ref(), profile.id).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "Profil berhasil disimpan")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
