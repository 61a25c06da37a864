use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::FileService;
use crate::errors::LmsError;
use crate::models::ErrorCode;
use crate::services::{error_response, error_response_with, workflow_from};
use crate::utils::file_magic::{FileKind, extension_of};

fn content_type_for(file_name: &str) -> &'static str {
    let ext = extension_of(file_name).unwrap_or_default();
    match FileKind::from_extension(&ext) {
        Some(FileKind::Pdf) => "application/pdf",
        Some(FileKind::Png) => "image/png",
        Some(FileKind::Jpeg) => "image/jpeg",
        Some(FileKind::PlainText) => "text/plain; charset=utf-8",
        Some(FileKind::ZipContainer) if ext == ".zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// GET /files/{bucket}/{path}
pub async fn handle_download(
    service: &FileService,
    request: &HttpRequest,
    bucket: String,
    path: String,
) -> ActixResult<HttpResponse> {
    let workflow = match workflow_from(service.preset(), request) {
        Ok(w) => w,
        Err(resp) => return Ok(resp),
    };

    let bytes = match workflow.blobs().get(&bucket, &path).await {
        Ok(bytes) => bytes,
        Err(e @ LmsError::NotFound(_)) => {
            return Ok(error_response_with(&e, ErrorCode::FileNotFound));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    let file_name = path.rsplit('/').next().unwrap_or(path.as_str());
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type_for(file_name)))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(bytes))
}
