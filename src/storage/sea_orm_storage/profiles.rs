//! 用户资料存储操作

use chrono::{DateTime, Utc};

use super::SeaOrmStorage;
use crate::entity::profiles::{ActiveModel, Column, Entity as Profiles};
use crate::errors::{LmsError, Result};
use crate::models::profiles::{entities::Profile, requests::ProfileUpsert};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建或更新用户资料
    pub async fn upsert_profile_impl(
        &self,
        profile: ProfileUpsert,
        at: DateTime<Utc>,
    ) -> Result<Profile> {
        let now = at.timestamp();

        let existing = Profiles::find_by_id(profile.id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询用户资料失败: {e}")))?;

        let result = match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.nama = Set(profile.nama);
                active.role = Set(profile.role.to_string());
                active.tingkat = Set(profile.tingkat);
                active.nama_kelas = Set(profile.nama_kelas);
                active.nis = Set(profile.nis);
                active.nip = Set(profile.nip);
                active.updated_at = Set(now);
                active
                    .update(&self.db)
                    .await
                    .map_err(|e| LmsError::transient_io(format!("更新用户资料失败: {e}")))?
            }
            None => ActiveModel {
                id: Set(profile.id),
                nama: Set(profile.nama),
                role: Set(profile.role.to_string()),
                tingkat: Set(profile.tingkat),
                nama_kelas: Set(profile.nama_kelas),
                nis: Set(profile.nis),
                nip: Set(profile.nip),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("创建用户资料失败: {e}")))?,
        };

        Ok(result.into_profile())
    }

    /// 通过 ID 获取用户资料
    pub async fn get_profile_by_id_impl(&self, id: i64) -> Result<Option<Profile>> {
        let result = Profiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询用户资料失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 批量获取用户资料
    pub async fn list_profiles_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Profile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Profiles::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询用户资料失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_profile()).collect())
    }
}
