//! 教学文档存储操作

use super::SeaOrmStorage;
use crate::entity::lesson_plans::{ActiveModel, Column, Entity as LessonPlans};
use crate::errors::{LmsError, Result};
use crate::models::lesson_plans::{
    entities::LessonPlan,
    requests::{LessonPlanListQuery, NewLessonPlan},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_lesson_plan_impl(&self, req: NewLessonPlan) -> Result<LessonPlan> {
        let now = req.created_at.timestamp();

        let model = ActiveModel {
            judul: Set(req.judul),
            tipe: Set(req.tipe.to_string()),
            file_url: Set(req.file_url),
            file_name: Set(req.file_name),
            file_path: Set(req.file_path),
            tingkat: Set(req.tingkat),
            nama_kelas: Set(req.nama_kelas),
            mapel: Set(req.mapel.to_string()),
            semester: Set(req.semester.to_string()),
            tahun_ajaran: Set(req.tahun_ajaran),
            tp: Set(req.tp),
            created_by: Set(req.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("创建教学文档失败: {e}")))?;

        Ok(result.into_lesson_plan())
    }

    pub async fn get_lesson_plan_by_id_impl(&self, id: i64) -> Result<Option<LessonPlan>> {
        let result = LessonPlans::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询教学文档失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson_plan()))
    }

    /// 列出教学文档，新上传的在前
    pub async fn list_lesson_plans_impl(
        &self,
        query: LessonPlanListQuery,
    ) -> Result<Vec<LessonPlan>> {
        let mut select = LessonPlans::find();

        if let Some(tipe) = query.tipe {
            select = select.filter(Column::Tipe.eq(tipe.as_str()));
        }
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
        if let Some(ref tahun_ajaran) = query.tahun_ajaran {
            select = select.filter(Column::TahunAjaran.eq(tahun_ajaran.as_str()));
        }
        if let Some(ref tp) = query.tp {
            select = select.filter(Column::Tp.eq(tp.as_str()));
        }

        let models = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询教学文档列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_lesson_plan()).collect())
    }

    pub async fn delete_lesson_plan_impl(&self, id: i64) -> Result<bool> {
        let result = LessonPlans::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("删除教学文档失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
