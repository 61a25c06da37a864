use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::LmsError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{context, error_response_with};

/// PUT /submissions/{id}/grade
pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    value: f64,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    match workflow.grade(&actor, submission_id, value).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Nilai berhasil disimpan",
        ))),
        Err(LmsError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeInvalid, msg))),
        Err(e) => Ok(error_response_with(&e, ErrorCode::SubmissionNotFound)),
    }
}
