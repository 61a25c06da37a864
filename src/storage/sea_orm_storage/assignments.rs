//! 作业存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{LmsError, Result};
use crate::models::assignments::{
    entities::Assignment,
    requests::{AssignmentListQuery, NewAssignment},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, req: NewAssignment) -> Result<Assignment> {
        let now = req.created_at.timestamp();

        let model = ActiveModel {
            judul: Set(req.judul),
            deskripsi: Set(req.deskripsi),
            file_url: Set(req.file_url),
            file_name: Set(req.file_name),
            tingkat: Set(req.tingkat),
            nama_kelas: Set(req.nama_kelas),
            mapel: Set(req.mapel.to_string()),
            semester: Set(req.semester.to_string()),
            kategori: Set(req.kategori.to_string()),
            tp: Set(req.tp),
            deadline: Set(req.deadline.timestamp()),
            created_by: Set(req.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 列出作业
    pub async fn list_assignments_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<Vec<Assignment>> {
        let mut select = Assignments::find();

        if let Some(tingkat) = query.tingkat {
            select = select.filter(Column::Tingkat.eq(tingkat));
        }
        if let Some(ref nama_kelas) = query.nama_kelas
            && !nama_kelas.trim().is_empty()
        {
            select = select.filter(Column::NamaKelas.eq(nama_kelas.trim()));
        }
        if let Some(mapel) = query.mapel {
            select = select.filter(Column::Mapel.eq(mapel.as_str()));
        }
        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester.as_str()));
        }
        if let Some(kategori) = query.kategori {
            select = select.filter(Column::Kategori.eq(kategori.as_str()));
        }
        if let Some(created_by) = query.created_by {
            select = select.filter(Column::CreatedBy.eq(created_by));
        }

        let models = select
            .order_by_asc(Column::Deadline)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询作业列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 删除作业（先删除其提交，再删除作业本身）
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LmsError::transient_io(format!("开启事务失败: {e}")))?;

        Submissions::delete_many()
            .filter(SubmissionColumn::AssignmentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| LmsError::transient_io(format!("删除作业提交失败: {e}")))?;

        let result = Assignments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| LmsError::transient_io(format!("删除作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| LmsError::transient_io(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计每个作业的提交数（没有提交的作业不出现在结果中）
    pub async fn count_submissions_by_assignment_ids_impl(
        &self,
        assignment_ids: &[i64],
    ) -> Result<HashMap<i64, i64>> {
        if assignment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let owners: Vec<i64> = Submissions::find()
            .select_only()
            .column(SubmissionColumn::AssignmentId)
            .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids.to_vec()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("统计提交数失败: {e}")))?;

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for assignment_id in owners {
            *counts.entry(assignment_id).or_insert(0) += 1;
        }

        Ok(counts)
    }
}
