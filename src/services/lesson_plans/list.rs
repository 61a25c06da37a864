use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonPlanService;
use crate::models::ApiResponse;
use crate::models::lesson_plans::{
    requests::LessonPlanListParams, responses::LessonPlanListResponse,
};
use crate::services::{context, error_response};

pub async fn list_lesson_plans(
    service: &LessonPlanService,
    request: &HttpRequest,
    params: LessonPlanListParams,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    match workflow.list_lesson_plans(&actor, params).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            LessonPlanListResponse { items },
            "Berhasil",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
