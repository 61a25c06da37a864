pub mod me;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::grading::GradingWorkflow;
use crate::models::profiles::requests::UpdateProfileRequest;

pub struct ProfileService {
    workflow: Option<GradingWorkflow>,
}

impl ProfileService {
    pub fn new_lazy() -> Self {
        Self { workflow: None }
    }

    pub(crate) fn preset(&self) -> &Option<GradingWorkflow> {
        &self.workflow
    }

    /// 当前用户资料
    pub async fn get_me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::get_me(self, request).await
    }

    /// 更新当前用户资料
    pub async fn update_me(
        &self,
        request: &HttpRequest,
        req: UpdateProfileRequest,
    ) -> ActixResult<HttpResponse> {
        me::update_me(self, request, req).await
    }
}
