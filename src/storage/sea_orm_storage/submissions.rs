//! 提交存储操作

use chrono::{DateTime, Utc};

use super::SeaOrmStorage;
use crate::entity::profiles::Entity as Profiles;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{LmsError, Result};
use crate::models::profiles::entities::Profile;
use crate::models::submissions::{entities::Submission, requests::NewSubmission};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(&self, req: NewSubmission) -> Result<Submission> {
        let model = ActiveModel {
            assignment_id: Set(req.assignment_id),
            student_id: Set(req.student_id),
            file_url: Set(req.file_url),
            file_name: Set(req.file_name),
            catatan: Set(req.catatan),
            submitted_at: Set(req.submitted_at.timestamp()),
            reviewed: Set(false),
            reviewed_at: Set(None),
            grade: Set(None),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
                LmsError::validation("Tugas ini sudah dikumpulkan")
            } else {
                LmsError::transient_io(format!("创建提交失败: {e}"))
            }
        })?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 查找学生对某作业的提交
    pub async fn find_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出某作业的全部提交及提交者资料
    pub async fn list_submissions_by_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<(Submission, Option<Profile>)>> {
        let rows = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::SubmittedAt)
            .order_by_asc(Column::Id)
            .find_also_related(Profiles)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询提交列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(submission, profile)| {
                (
                    submission.into_submission(),
                    profile.map(|p| p.into_profile()),
                )
            })
            .collect())
    }

    /// 列出学生在给定作业上的提交
    pub async fn list_submissions_by_student_impl(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::AssignmentId.is_in(assignment_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询学生提交失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 设置已查看状态
    pub async fn set_submission_reviewed_impl(
        &self,
        id: i64,
        reviewed_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Submission>> {
        let Some(model) = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询提交失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.reviewed = Set(reviewed_at.is_some());
        active.reviewed_at = Set(reviewed_at.map(|t| t.timestamp()));

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("更新提交状态失败: {e}")))?;

        Ok(Some(updated.into_submission()))
    }
}
