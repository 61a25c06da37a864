use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonPlanService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{context, error_response_with};

pub async fn delete_lesson_plan(
    service: &LessonPlanService,
    request: &HttpRequest,
    plan_id: i64,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    match workflow.delete_lesson_plan(&actor, plan_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Dokumen berhasil dihapus"))),
        Err(e) => Ok(error_response_with(&e, ErrorCode::LessonPlanNotFound)),
    }
}
