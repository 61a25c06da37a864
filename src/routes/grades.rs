use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::{
    CreateGradeRequest, GradeListParams, GradeSummaryParams, RecapParams,
};
use crate::models::profiles::entities::UserRole;
use crate::services::GradeService;

// 懒加载的全局 GradeService 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// 录入成绩
pub async fn create_grade(
    req: HttpRequest,
    body: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.create_grade(&req, body.into_inner()).await
}

// 成绩历史
pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeListParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(&req, query.into_inner()).await
}

// 成绩汇总
pub async fn recap(
    req: HttpRequest,
    query: web::Query<RecapParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.recap(&req, query.into_inner()).await
}

// 我的成绩概览
pub async fn my_summary(
    req: HttpRequest,
    query: web::Query<GradeSummaryParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.my_summary(&req, query.into_inner()).await
}

// 配置路由
pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 成绩历史 - 所有登录用户（学生只能看到自己的）
                    .route(web::get().to(list_grades))
                    // 录入成绩 - 仅教师
                    .route(
                        web::post()
                            .to(create_grade)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/recap")
                    .route(web::get().to(recap))
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
            )
            .service(
                web::resource("/me/summary")
                    .route(web::get().to(my_summary))
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
            ),
    );
}
