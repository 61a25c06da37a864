use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::lesson_plans::requests::LessonPlanListParams;
use crate::models::profiles::entities::UserRole;
use crate::services::LessonPlanService;
use crate::utils::SafeIDI64;

static LESSON_PLAN_SERVICE: Lazy<LessonPlanService> = Lazy::new(LessonPlanService::new_lazy);

pub async fn list_lesson_plans(
    req: HttpRequest,
    query: web::Query<LessonPlanListParams>,
) -> ActixResult<HttpResponse> {
    LESSON_PLAN_SERVICE
        .list_lesson_plans(&req, query.into_inner())
        .await
}

pub async fn upload_lesson_plan(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    LESSON_PLAN_SERVICE.upload_lesson_plan(&req, payload).await
}

pub async fn delete_lesson_plan(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    LESSON_PLAN_SERVICE.delete_lesson_plan(&req, path.0).await
}

// 教学文档整个 scope 仅教师可访问
pub fn configure_lesson_plan_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/lesson-plans")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_lesson_plans))
                    .route(web::post().to(upload_lesson_plan)),
            )
            .service(web::resource("/{id}").route(web::delete().to(delete_lesson_plan))),
    );
}
