use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::ApiResponse;
use crate::models::grades::requests::GradeSummaryParams;
use crate::services::{context, error_response};

/// GET /grades/me/summary
pub async fn my_summary(
    service: &GradeService,
    request: &HttpRequest,
    params: GradeSummaryParams,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    match workflow
        .student_summary(&actor, params.mapel, params.semester)
        .await
    {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary, "Berhasil"))),
        Err(e) => Ok(error_response(&e)),
    }
}
