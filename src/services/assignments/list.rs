use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::ApiResponse;
use crate::models::assignments::{
    requests::AssignmentListParams,
    responses::{StudentAssignmentListResponse, TeacherAssignmentListResponse},
};
use crate::models::profiles::entities::UserRole;
use crate::services::{context, error_response};

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    params: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    match actor.role {
        UserRole::Guru => match workflow.list_assignments_for_teacher(&actor, params).await {
            Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                TeacherAssignmentListResponse { items },
                "Berhasil",
            ))),
            Err(e) => Ok(error_response(&e)),
        },
        // 学生只能按科目与学期筛选，班级取自本人资料
        UserRole::Siswa => match workflow
            .list_assignments_for_student(&actor, params.mapel, params.semester)
            .await
        {
            Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                StudentAssignmentListResponse { items },
                "Berhasil",
            ))),
            Err(e) => Ok(error_response(&e)),
        },
    }
}
