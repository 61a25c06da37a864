use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::ApiResponse;
use crate::models::materials::{requests::MaterialListParams, responses::MaterialListResponse};
use crate::services::{context, error_response};

pub async fn list_materials(
    service: &MaterialService,
    request: &HttpRequest,
    params: MaterialListParams,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    match workflow.list_materials(&actor, params).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MaterialListResponse { items },
            "Berhasil",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
