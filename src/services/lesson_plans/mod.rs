pub mod delete;
pub mod list;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::grading::GradingWorkflow;
use crate::models::lesson_plans::requests::LessonPlanListParams;

pub struct LessonPlanService {
    workflow: Option<GradingWorkflow>,
}

impl LessonPlanService {
    pub fn new_lazy() -> Self {
        Self { workflow: None }
    }

    pub(crate) fn preset(&self) -> &Option<GradingWorkflow> {
        &self.workflow
    }

    pub async fn upload_lesson_plan(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_lesson_plan(self, request, payload).await
    }

    pub async fn list_lesson_plans(
        &self,
        request: &HttpRequest,
        params: LessonPlanListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_lesson_plans(self, request, params).await
    }

    pub async fn delete_lesson_plan(
        &self,
        request: &HttpRequest,
        plan_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_lesson_plan(self, request, plan_id).await
    }
}
