pub mod assignments;
pub mod files;
pub mod grades;
pub mod lesson_plans;
pub mod materials;
pub mod profiles;
pub mod submissions;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::LmsError;
use crate::grading::GradingWorkflow;
use crate::middlewares::RequireJWT;
use crate::models::files::requests::FileUpload;
use crate::models::profiles::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::{MultipartForm, read_multipart};

pub use assignments::AssignmentService;
pub use files::FileService;
pub use grades::GradeService;
pub use lesson_plans::LessonPlanService;
pub use materials::MaterialService;
pub use profiles::ProfileService;
pub use submissions::SubmissionService;

/// 领域错误对应的 HTTP 状态码
pub fn status_of(err: &LmsError) -> StatusCode {
    match err {
        LmsError::Validation(_) => StatusCode::BAD_REQUEST,
        LmsError::Authentication(_) => StatusCode::UNAUTHORIZED,
        LmsError::Authorization(_) => StatusCode::FORBIDDEN,
        LmsError::NotFound(_) => StatusCode::NOT_FOUND,
        LmsError::TransientIo(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn error_response(err: &LmsError) -> HttpResponse {
    if !err.is_rejection() {
        warn!("{}", err.format_simple());
    }
    HttpResponse::build(status_of(err)).json(ApiResponse::<()>::from_error(err))
}

/// NotFound 使用更具体的错误码
pub(crate) fn error_response_with(err: &LmsError, not_found: ErrorCode) -> HttpResponse {
    match err {
        LmsError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(not_found, msg.as_str()))
        }
        _ => error_response(err),
    }
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// 读取带文件的上传表单；文件缺失或为空时直接返回 400
pub(crate) async fn read_upload_form(
    payload: Multipart,
) -> Result<(MultipartForm, FileUpload), HttpResponse> {
    let mut form = match read_multipart(payload, &AppConfig::get().upload).await {
        Ok(form) => form,
        Err(rejection) => {
            debug!("Rejected upload: {:?}", rejection);
            return Err(bad_request(rejection.error_code(), rejection.message()));
        }
    };
    let Some(file) = form.file.take() else {
        return Err(bad_request(
            ErrorCode::FileNotFound,
            "Tidak ada file dalam unggahan",
        ));
    };
    if file.bytes.is_empty() {
        return Err(bad_request(ErrorCode::FileNotFound, "File kosong"));
    }
    Ok((
        form,
        FileUpload {
            file_name: file.file_name,
            bytes: file.bytes,
        },
    ))
}

pub(crate) fn unauthenticated() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Pengguna belum login",
    ))
}

fn workflow_unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
        ErrorCode::StorageUnavailable,
        "Layanan belum siap",
    ))
}

/// 从 app data 取出业务流程实例
pub(crate) fn workflow_from(
    preset: &Option<GradingWorkflow>,
    request: &HttpRequest,
) -> Result<GradingWorkflow, HttpResponse> {
    if let Some(workflow) = preset {
        return Ok(workflow.clone());
    }
    request
        .app_data::<web::Data<GradingWorkflow>>()
        .map(|w| w.get_ref().clone())
        .ok_or_else(workflow_unavailable)
}

/// 取出业务流程与当前调用者
pub(crate) fn context(
    preset: &Option<GradingWorkflow>,
    request: &HttpRequest,
) -> Result<(GradingWorkflow, Actor), HttpResponse> {
    let workflow = workflow_from(preset, request)?;
    let actor = RequireJWT::extract_actor(request).ok_or_else(unauthenticated)?;
    Ok((workflow, actor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(&LmsError::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(&LmsError::authentication("x")), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(&LmsError::authorization("x")), StatusCode::FORBIDDEN);
        assert_eq!(status_of(&LmsError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(&LmsError::transient_io("x")),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(&LmsError::serialization("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
