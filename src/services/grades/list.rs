use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::ApiResponse;
use crate::models::grades::requests::GradeListParams;
use crate::services::{context, error_response};

/// GET /grades
pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    params: GradeListParams,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    match workflow.grade_history(&actor, params).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Berhasil"))),
        Err(e) => Ok(error_response(&e)),
    }
}
