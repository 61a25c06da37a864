pub mod grade;
pub mod review;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::grading::GradingWorkflow;

pub struct SubmissionService {
    workflow: Option<GradingWorkflow>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { workflow: None }
    }

    pub(crate) fn preset(&self) -> &Option<GradingWorkflow> {
        &self.workflow
    }

    /// 标记 / 取消已查看
    pub async fn set_reviewed(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        reviewed: bool,
    ) -> ActixResult<HttpResponse> {
        review::set_reviewed(self, request, submission_id, reviewed).await
    }

    /// 评分并同步成绩
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        value: f64,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, submission_id, value).await
    }
}
