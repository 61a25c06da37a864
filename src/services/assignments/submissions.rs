use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::AssignmentService;
use crate::config::AppConfig;
use crate::models::submissions::requests::SubmissionFile;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{context, error_response, error_response_with};
use crate::utils::read_multipart;

/// GET /assignments/{id}/submissions
pub async fn list_submissions(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    match workflow.assignment_submissions(&actor, assignment_id).await {
        Ok(view) => Ok(HttpResponse::Ok().json(ApiResponse::success(view, "Berhasil"))),
        Err(e) => Ok(error_response_with(&e, ErrorCode::AssignmentNotFound)),
    }
}

/// POST /assignments/{id}/submissions
///
/// multipart 表单：可选的 `file` 字段与可选的 `catatan` 文本字段。
pub async fn submit(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    let form = match read_multipart(payload, &AppConfig::get().upload).await {
        Ok(form) => form,
        Err(rejection) => {
            debug!(
                "Rejected submission upload for assignment {}: {:?}",
                assignment_id, rejection
            );
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                rejection.error_code(),
                rejection.message(),
            )));
        }
    };

    let note = form.text("catatan");
    let file = form.file.map(|f| SubmissionFile {
        file_name: f.file_name,
        bytes: f.bytes,
    });

    match workflow.submit(&actor, assignment_id, file, note).await {
        Ok(submission) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(submission, "Tugas berhasil dikumpulkan"))),
        Err(e) => Ok(error_response(&e)),
    }
}
