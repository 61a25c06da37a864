pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::grading::GradingWorkflow;

pub struct FileService {
    workflow: Option<GradingWorkflow>,
}

impl FileService {
    pub fn new_lazy() -> Self {
        Self { workflow: None }
    }

    pub(crate) fn preset(&self) -> &Option<GradingWorkflow> {
        &self.workflow
    }

    // Handle file upload
    pub async fn handle_upload(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, payload).await
    }

    // Handle file download
    pub async fn handle_download(
        &self,
        request: &HttpRequest,
        bucket: String,
        path: String,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, bucket, path).await
    }
}
