use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{context, error_response_with};

/// PUT /submissions/{id}/reviewed
pub async fn set_reviewed(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    reviewed: bool,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    match workflow.mark_reviewed(&actor, submission_id, reviewed).await {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            submission,
            if reviewed {
                "Ditandai sudah dicek"
            } else {
                "Tanda dicek dibatalkan"
            },
        ))),
        Err(e) => Ok(error_response_with(&e, ErrorCode::SubmissionNotFound)),
    }
}
