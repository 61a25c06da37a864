use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::profiles::entities::UserRole;
use crate::models::submissions::requests::{GradeSubmissionRequest, SetReviewedRequest};
use crate::services::SubmissionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 标记已查看
pub async fn set_reviewed(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<SetReviewedRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .set_reviewed(&req, path.0, body.reviewed)
        .await
}

// 评分
pub async fn grade_submission(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_submission(&req, path.0, body.grade)
        .await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .route("/{id}/reviewed", web::put().to(set_reviewed))
            .route("/{id}/grade", web::put().to(grade_submission)),
    );
}
