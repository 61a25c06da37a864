//! 学习材料：教师按班级上传，学生查看本班材料

use std::collections::HashMap;

use tracing::{info, warn};
use uuid::Uuid;

use super::workflow::{GradingWorkflow, require_teacher};
use crate::blob::{self, MATERIAL_BUCKET};
use crate::clock::Clock;
use crate::errors::{LmsError, Result};
use crate::models::{
    files::requests::FileUpload,
    materials::{
        entities::Material,
        requests::{CreateMaterialRequest, MaterialListParams, MaterialListQuery, NewMaterial},
        responses::MaterialItem,
    },
    profiles::entities::{Actor, UserRole},
    school::{Mapel, is_valid_kelas, tingkat_label},
};
use crate::utils::validate::{non_empty, validate_judul};

/// 校验年级、班级与科目的组合
pub(super) fn validate_class_scope(
    tingkat: i32,
    nama_kelas: Option<&str>,
    mapel: Mapel,
) -> Result<()> {
    if tingkat_label(tingkat).is_none() {
        return Err(LmsError::validation(format!(
            "Tingkat {tingkat} tidak dikenal"
        )));
    }
    if let Some(nama_kelas) = nama_kelas
        && !is_valid_kelas(tingkat, nama_kelas)
    {
        return Err(LmsError::validation(format!(
            "Kelas {nama_kelas} tidak sesuai dengan tingkat {tingkat}"
        )));
    }
    if !mapel.is_offered_for(tingkat) {
        return Err(LmsError::validation(format!(
            "Mapel {mapel} tidak tersedia untuk tingkat {tingkat}"
        )));
    }
    Ok(())
}

impl GradingWorkflow {
    // 教师上传前的共同检查：需要资料且文件非空
    pub(super) fn check_teacher_upload(&self, actor: &Actor, file: &FileUpload) -> Result<()> {
        require_teacher(actor)?;
        if actor.profile.is_none() {
            return Err(LmsError::validation("Lengkapi profil terlebih dahulu"));
        }
        if file.file_name.trim().is_empty() || file.bytes.is_empty() {
            return Err(LmsError::validation("File wajib diunggah"));
        }
        Ok(())
    }

    /// 写入教师上传的文件，返回 (桶内路径, 公开地址)
    pub(super) async fn store_teacher_file(
        &self,
        bucket: &str,
        actor: &Actor,
        file: &FileUpload,
    ) -> Result<(String, String)> {
        // 同一毫秒内的重复上传用 uuid 区分
        let unique_name = format!("{}_{}", Uuid::new_v4().simple(), file.file_name);
        let path = blob::attachment_path(
            actor.id,
            self.clock().now().timestamp_millis(),
            &unique_name,
        );
        let url = self.blobs().put(bucket, &path, &file.bytes).await?;
        Ok((path, url))
    }

    /// 尽力删除文件，失败只记日志
    pub(super) async fn discard_file(&self, bucket: &str, path: &str) {
        if let Err(e) = self.blobs().delete(bucket, path).await {
            warn!("Failed to remove file {}/{}: {}", bucket, path, e);
        }
    }

    /// 教师上传学习材料
    pub async fn upload_material(
        &self,
        actor: &Actor,
        req: CreateMaterialRequest,
        file: FileUpload,
    ) -> Result<Material> {
        self.check_teacher_upload(actor, &file)?;
        validate_judul(&req.judul).map_err(LmsError::validation)?;
        let nama_kelas = req.nama_kelas.trim().to_string();
        validate_class_scope(req.tingkat, Some(&nama_kelas), req.mapel)?;

        let (path, url) = self
            .store_teacher_file(MATERIAL_BUCKET, actor, &file)
            .await?;

        let created = self
            .storage()
            .create_material(NewMaterial {
                judul: req.judul.trim().to_string(),
                deskripsi: non_empty(req.deskripsi),
                file_url: url,
                file_name: file.file_name,
                file_path: path.clone(),
                tingkat: req.tingkat,
                nama_kelas,
                mapel: req.mapel,
                semester: req.semester,
                created_by: actor.id,
                created_at: self.clock().now(),
            })
            .await;
        let material = match created {
            Ok(material) => material,
            Err(e) => {
                self.discard_file(MATERIAL_BUCKET, &path).await;
                return Err(e);
            }
        };

        info!(
            "Material {} uploaded by {} for {} ({})",
            material.id, actor.id, material.nama_kelas, material.mapel
        );
        Ok(material)
    }

    /// 材料列表。教师可按任意条件筛选；学生只看到本班材料，可按科目与标题筛选
    pub async fn list_materials(
        &self,
        actor: &Actor,
        params: MaterialListParams,
    ) -> Result<Vec<MaterialItem>> {
        let query = match actor.role {
            UserRole::Guru => MaterialListQuery {
                tingkat: params.tingkat,
                nama_kelas: non_empty(params.nama_kelas),
                mapel: params.mapel,
                semester: params.semester,
            },
            UserRole::Siswa => {
                let profile = self.actor_profile(actor).await?;
                let Some(nama_kelas) = profile.nama_kelas else {
                    return Err(LmsError::validation("Kelas belum diatur pada profil"));
                };
                MaterialListQuery {
                    tingkat: None,
                    nama_kelas: Some(nama_kelas),
                    mapel: params.mapel,
                    semester: params.semester,
                }
            }
        };

        let mut materials = self.storage().list_materials(query).await?;
        if let Some(q) = non_empty(params.q) {
            let needle = q.to_lowercase();
            materials.retain(|m| m.judul.to_lowercase().contains(&needle));
        }

        let mut uploader_ids: Vec<i64> = materials.iter().map(|m| m.created_by).collect();
        uploader_ids.sort_unstable();
        uploader_ids.dedup();
        let names: HashMap<i64, String> = self
            .storage()
            .list_profiles_by_ids(&uploader_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p.nama))
            .collect();

        Ok(materials
            .into_iter()
            .map(|material| MaterialItem {
                uploader: names.get(&material.created_by).cloned(),
                material,
            })
            .collect())
    }

    /// 教师删除材料；记录删除后再删文件
    pub async fn delete_material(&self, actor: &Actor, material_id: i64) -> Result<()> {
        require_teacher(actor)?;
        let material = self
            .storage()
            .get_material_by_id(material_id)
            .await?
            .ok_or_else(|| LmsError::not_found(format!("Materi {material_id} tidak ditemukan")))?;

        if !self.storage().delete_material(material_id).await? {
            return Err(LmsError::not_found(format!(
                "Materi {material_id} tidak ditemukan"
            )));
        }
        self.discard_file(MATERIAL_BUCKET, &material.file_path).await;

        info!("Material {} deleted by {}", material_id, actor.id);
        Ok(())
    }
}
