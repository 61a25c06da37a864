pub mod create;
pub mod list;
pub mod recap;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::grading::GradingWorkflow;
use crate::models::grades::requests::{
    CreateGradeRequest, GradeListParams, GradeSummaryParams, RecapParams,
};

pub struct GradeService {
    workflow: Option<GradingWorkflow>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { workflow: None }
    }

    pub(crate) fn preset(&self) -> &Option<GradingWorkflow> {
        &self.workflow
    }

    /// 直接录入成绩
    pub async fn create_grade(
        &self,
        request: &HttpRequest,
        req: CreateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, request, req).await
    }

    /// 成绩历史
    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        params: GradeListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, params).await
    }

    /// 成绩汇总表
    pub async fn recap(
        &self,
        request: &HttpRequest,
        params: RecapParams,
    ) -> ActixResult<HttpResponse> {
        recap::recap(self, request, params).await
    }

    /// 学生本人的成绩概览
    pub async fn my_summary(
        &self,
        request: &HttpRequest,
        params: GradeSummaryParams,
    ) -> ActixResult<HttpResponse> {
        summary::my_summary(self, request, params).await
    }
}
