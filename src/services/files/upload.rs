use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, info};
use uuid::Uuid;

use super::FileService;
use crate::blob::{ASSIGNMENT_BUCKET, attachment_path};
use crate::clock::Clock;
use crate::config::AppConfig;
use crate::models::files::responses::FileUploadResponse;
use crate::models::profiles::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{context, error_response};
use crate::utils::read_multipart;

/// 教师上传作业附件，返回的地址用于创建作业
pub async fn handle_upload(
    service: &FileService,
    req: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let (workflow, actor) = match context(service.preset(), req) {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };
    if actor.role != UserRole::Guru {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Hanya guru yang dapat mengunggah lampiran",
        )));
    }

    let form = match read_multipart(payload, &AppConfig::get().upload).await {
        Ok(form) => form,
        Err(rejection) => {
            debug!("Rejected attachment upload: {:?}", rejection);
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                rejection.error_code(),
                rejection.message(),
            )));
        }
    };

    let Some(file) = form.file else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "Tidak ada file dalam unggahan",
        )));
    };
    if file.bytes.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "File kosong",
        )));
    }

    // 同一毫秒内的重复上传用 uuid 区分
    let now = workflow.clock().now();
    let unique_name = format!("{}_{}", Uuid::new_v4().simple(), file.file_name);
    let path = attachment_path(actor.id, now.timestamp_millis(), &unique_name);

    match workflow
        .blobs()
        .put(ASSIGNMENT_BUCKET, &path, &file.bytes)
        .await
    {
        Ok(url) => {
            info!(
                "Attachment {} ({} bytes) uploaded by {}",
                path,
                file.bytes.len(),
                actor.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                FileUploadResponse {
                    bucket: ASSIGNMENT_BUCKET.to_string(),
                    path,
                    url,
                    file_name: file.file_name,
                    size: file.bytes.len() as i64,
                    uploaded_at: now,
                },
                "File berhasil diunggah",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
