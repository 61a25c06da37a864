use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::ApiResponse;
use crate::models::grades::{requests::RecapParams, responses::RecapResponse};
use crate::services::{context, error_response};

/// GET /grades/recap
pub async fn recap(
    service: &GradeService,
    request: &HttpRequest,
    params: RecapParams,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    match workflow.recap(&actor, params).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RecapResponse { rows },
            "Berhasil",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
