use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::materials::requests::CreateMaterialRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, context, error_response, read_upload_form};
use crate::utils::MultipartForm;

fn parse_request(form: &MultipartForm) -> Result<CreateMaterialRequest, String> {
    Ok(CreateMaterialRequest {
        judul: form.parse_required("judul")?,
        deskripsi: form.text("deskripsi"),
        tingkat: form.parse_required("tingkat")?,
        nama_kelas: form.parse_required("nama_kelas")?,
        mapel: form.parse_required("mapel")?,
        semester: form.parse_required("semester")?,
    })
}

/// POST /materials
///
/// multipart 表单：`file` 字段以及 judul、deskripsi、tingkat、nama_kelas、mapel、semester 文本字段。
pub async fn upload_material(
    service: &MaterialService,
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

    match workflow.upload_material(&actor, req, file).await {
        Ok(material) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(material, "Materi berhasil diunggah"))),
        Err(e) => Ok(error_response(&e)),
    }
}
