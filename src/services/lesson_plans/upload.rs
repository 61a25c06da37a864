use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonPlanService;
use crate::models::lesson_plans::{entities::DocumentType, requests::CreateLessonPlanRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, context, error_response, read_upload_form};
use crate::utils::MultipartForm;

fn parse_request(form: &MultipartForm) -> Result<CreateLessonPlanRequest, String> {
    Ok(CreateLessonPlanRequest {
        judul: form.parse_required("judul")?,
        // 未指定类型时按教案处理
        tipe: form.parse_optional("tipe")?.unwrap_or(DocumentType::Rpp),
        tingkat: form.parse_required("tingkat")?,
        nama_kelas: form.text("nama_kelas"),
        mapel: form.parse_required("mapel")?,
        semester: form.parse_required("semester")?,
        tahun_ajaran: form.parse_required("tahun_ajaran")?,
        tp: form.text("tp"),
    })
}

/// POST /lesson-plans
pub async fn upload_lesson_plan(
    service: &LessonPlanService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), request) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    let (form, file) = match read_upload_form(payload).await {
        Ok(upload) => upload,
        Err(resp) => return Ok(resp),
    };
    let req = match parse_request(&form) {
        Ok(req) => req,
        Err(message) => return Ok(bad_request(ErrorCode::BadRequest, message)),
    };

    match workflow.upload_lesson_plan(&actor, req, file).await {
        Ok(plan) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(plan, "Dokumen berhasil diunggah"))),
        Err(e) => Ok(error_response(&e)),
    }
}
