use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::ApiResponse;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::services::{context, error_response};

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    match workflow.create_assignment(&actor, req).await {
        Ok(assignment) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(assignment, "Tugas berhasil dibuat"))),
        Err(e) => Ok(error_response(&e)),
    }
}
