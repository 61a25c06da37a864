use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::errors::LmsError;
use crate::models::grades::requests::CreateGradeRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{context, error_response};

/// POST /grades
pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    req: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    match workflow.record_grade(&actor, req).await {
        Ok(record) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(record, "Nilai berhasil disimpan"))),
        Err(LmsError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::ProfileNotFound, msg))),
        Err(e) => Ok(error_response(&e)),
    }
}
