//! 学习材料存储操作

use super::SeaOrmStorage;
use crate::entity::materials::{ActiveModel, Column, Entity as Materials};
use crate::errors::{LmsError, Result};
use crate::models::materials::{
    entities::Material,
    requests::{MaterialListQuery, NewMaterial},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_material_impl(&self, req: NewMaterial) -> Result<Material> {
        let now = req.created_at.timestamp();

        let model = ActiveModel {
            judul: Set(req.judul),
            deskripsi: Set(req.deskripsi),
            file_url: Set(req.file_url),
            file_name: Set(req.file_name),
            file_path: Set(req.file_path),
            tingkat: Set(req.tingkat),
            nama_kelas: Set(req.nama_kelas),
            mapel: Set(req.mapel.to_string()),
            semester: Set(req.semester.to_string()),
            created_by: Set(req.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("创建材料失败: {e}")))?;

        Ok(result.into_material())
    }

    pub async fn get_material_by_id_impl(&self, id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询材料失败: {e}")))?;

        Ok(result.map(|m| m.into_material()))
    }

    /// 列出材料，新上传的在前
    pub async fn list_materials_impl(&self, query: MaterialListQuery) -> Result<Vec<Material>> {
        let mut select = Materials::find();

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

        let models = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询材料列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_material()).collect())
    }

    pub async fn delete_material_impl(&self, id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("删除材料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
