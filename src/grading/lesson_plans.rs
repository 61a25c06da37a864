//! 教学文档（学年计划、学期计划、教案），仅教师可见

use tracing::info;

use super::materials::validate_class_scope;
use super::workflow::{GradingWorkflow, require_teacher};
use crate::blob::DOCUMENT_BUCKET;
use crate::clock::Clock;
use crate::errors::{LmsError, Result};
use crate::models::{
    files::requests::FileUpload,
    lesson_plans::{
        entities::LessonPlan,
        requests::{CreateLessonPlanRequest, LessonPlanListParams, NewLessonPlan},
    },
    profiles::entities::Actor,
};
use crate::utils::validate::{non_empty, normalize_tp, validate_judul, validate_tahun_ajaran};

impl GradingWorkflow {
    pub async fn upload_lesson_plan(
        &self,
        actor: &Actor,
        req: CreateLessonPlanRequest,
        file: FileUpload,
    ) -> Result<LessonPlan> {
        self.check_teacher_upload(actor, &file)?;
        validate_judul(&req.judul).map_err(LmsError::validation)?;
        let nama_kelas = non_empty(req.nama_kelas);
        validate_class_scope(req.tingkat, nama_kelas.as_deref(), req.mapel)?;
        let tahun_ajaran =
            validate_tahun_ajaran(&req.tahun_ajaran).map_err(LmsError::validation)?;
        let tp = normalize_tp(req.tp.as_deref()).map_err(LmsError::validation)?;

        let (path, url) = self
            .store_teacher_file(DOCUMENT_BUCKET, actor, &file)
            .await?;

        let created = self
            .storage()
            .create_lesson_plan(NewLessonPlan {
                judul: req.judul.trim().to_string(),
                tipe: req.tipe,
                file_url: url,
                file_name: file.file_name,
                file_path: path.clone(),
                tingkat: req.tingkat,
                nama_kelas,
                mapel: req.mapel,
                semester: req.semester,
                tahun_ajaran,
                tp,
                created_by: actor.id,
                created_at: self.clock().now(),
            })
            .await;
        let plan = match created {
            Ok(plan) => plan,
            Err(e) => {
                self.discard_file(DOCUMENT_BUCKET, &path).await;
                return Err(e);
            }
        };

        info!(
            "Lesson plan {} ({}, {}) uploaded by {}",
            plan.id, plan.tipe, plan.tahun_ajaran, actor.id
        );
        Ok(plan)
    }

    pub async fn list_lesson_plans(
        &self,
        actor: &Actor,
        mut params: LessonPlanListParams,
    ) -> Result<Vec<LessonPlan>> {
        require_teacher(actor)?;
        params.nama_kelas = non_empty(params.nama_kelas);
        params.tahun_ajaran = non_empty(params.tahun_ajaran);
        params.tp = non_empty(params.tp);
        self.storage().list_lesson_plans(params.into()).await
    }

    /// 删除教学文档；记录删除后再删文件
    pub async fn delete_lesson_plan(&self, actor: &Actor, plan_id: i64) -> Result<()> {
        require_teacher(actor)?;
        let plan = self
            .storage()
            .get_lesson_plan_by_id(plan_id)
            .await?
            .ok_or_else(|| LmsError::not_found(format!("Dokumen {plan_id} tidak ditemukan")))?;

        if !self.storage().delete_lesson_plan(plan_id).await? {
            return Err(LmsError::not_found(format!(
                "Dokumen {plan_id} tidak ditemukan"
            )));
        }
        self.discard_file(DOCUMENT_BUCKET, &plan.file_path).await;

        info!("Lesson plan {} deleted by {}", plan_id, actor.id);
        Ok(())
    }
}
