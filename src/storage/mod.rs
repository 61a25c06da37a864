use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, NewAssignment},
    },
    grades::{
        entities::GradeRecord,
        requests::{GradeListQuery, GradeRecordDraft, SubmissionGrade},
        responses::GradeListResponse,
    },
    lesson_plans::{
        entities::LessonPlan,
        requests::{LessonPlanListQuery, NewLessonPlan},
    },
    materials::{
        entities::Material,
        requests::{MaterialListQuery, NewMaterial},
    },
    profiles::{entities::Profile, requests::ProfileUpsert},
    submissions::{
        entities::Submission, requests::NewSubmission, responses::GradeSubmissionResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户资料方法
    // 创建或更新用户资料（ID 来自身份服务）
    async fn upsert_profile(&self, profile: ProfileUpsert, at: DateTime<Utc>) -> Result<Profile>;
    // 通过ID获取用户资料
    async fn get_profile_by_id(&self, id: i64) -> Result<Option<Profile>>;
    // 批量获取用户资料
    async fn list_profiles_by_ids(&self, ids: &[i64]) -> Result<Vec<Profile>>;

    /// 作业方法
    // 创建作业
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 列出作业（按截止时间升序）
    async fn list_assignments(&self, query: AssignmentListQuery) -> Result<Vec<Assignment>>;
    // 删除作业，连同其全部提交
    async fn delete_assignment(&self, id: i64) -> Result<bool>;
    // 统计每个作业的提交数
    async fn count_submissions_by_assignment_ids(
        &self,
        assignment_ids: &[i64],
    ) -> Result<HashMap<i64, i64>>;

    /// 提交方法
    // 创建提交，同一学生对同一作业重复提交返回 Validation
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 查找学生对某作业的提交
    async fn find_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出某作业的全部提交及提交者资料（按提交时间升序）
    async fn list_submissions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<(Submission, Option<Profile>)>>;
    // 列出学生在给定作业上的提交
    async fn list_submissions_by_student(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>>;
    // 设置已查看状态，None 表示取消
    async fn set_submission_reviewed(
        &self,
        id: i64,
        reviewed_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Submission>>;

    /// 成绩方法
    // 评分并同步成绩记录（单个事务）
    async fn apply_submission_grade(&self, grade: SubmissionGrade)
    -> Result<GradeSubmissionResponse>;
    // 直接录入成绩
    async fn create_grade_record(&self, draft: GradeRecordDraft) -> Result<GradeRecord>;
    // 列出成绩记录（page 为空时返回全部）
    async fn list_grade_records(&self, query: GradeListQuery) -> Result<GradeListResponse>;

    /// 学习材料方法
    async fn create_material(&self, material: NewMaterial) -> Result<Material>;
    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>>;
    // 列出材料（按创建时间倒序）
    async fn list_materials(&self, query: MaterialListQuery) -> Result<Vec<Material>>;
    async fn delete_material(&self, id: i64) -> Result<bool>;

    /// 教学文档方法
    async fn create_lesson_plan(&self, plan: NewLessonPlan) -> Result<LessonPlan>;
    async fn get_lesson_plan_by_id(&self, id: i64) -> Result<Option<LessonPlan>>;
    // 列出教学文档（按创建时间倒序）
    async fn list_lesson_plans(&self, query: LessonPlanListQuery) -> Result<Vec<LessonPlan>>;
    async fn delete_lesson_plan(&self, id: i64) -> Result<bool>;
}
