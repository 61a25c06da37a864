pub mod delete;
pub mod list;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::grading::GradingWorkflow;
use crate::models::materials::requests::MaterialListParams;

pub struct MaterialService {
    workflow: Option<GradingWorkflow>,
}

impl MaterialService {
    pub fn new_lazy() -> Self {
        Self { workflow: None }
    }

    pub(crate) fn preset(&self) -> &Option<GradingWorkflow> {
        &self.workflow
    }

    /// 教师上传材料
    pub async fn upload_material(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_material(self, request, payload).await
    }

    /// 列出材料（学生只看到本班）
    pub async fn list_materials(
        &self,
        request: &HttpRequest,
        params: MaterialListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_materials(self, request, params).await
    }

    pub async fn delete_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_material(self, request, material_id).await
    }
}
