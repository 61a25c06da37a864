pub mod create;
pub mod delete;
pub mod list;
pub mod submissions;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::grading::GradingWorkflow;
use crate::models::assignments::requests::{AssignmentListParams, CreateAssignmentRequest};

pub struct AssignmentService {
    workflow: Option<GradingWorkflow>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { workflow: None }
    }

    pub(crate) fn preset(&self) -> &Option<GradingWorkflow> {
        &self.workflow
    }

    /// 创建作业
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        req: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, req).await
    }

    /// 列出作业（按调用者角色返回不同视图）
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        params: AssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, params).await
    }

    /// 删除作业
    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id).await
    }

    /// 教师查看作业的全部提交
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        submissions::list_submissions(self, request, assignment_id).await
    }

    /// 学生提交作业
    pub async fn submit(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        submissions::submit(self, request, assignment_id, payload).await
    }
}
