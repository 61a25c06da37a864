use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::DocumentType;
use crate::models::school::{Mapel, Semester};

/// 上传教学文档时的表单字段（multipart 文本字段）
#[derive(Debug, Clone)]
pub struct CreateLessonPlanRequest {
    pub judul: String,
    pub tipe: DocumentType,
    pub tingkat: i32,
    pub nama_kelas: Option<String>,
    pub mapel: Mapel,
    pub semester: Semester,
    pub tahun_ajaran: String,
    pub tp: Option<String>,
}

/// 教学文档列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "lesson_plan.ts")]
pub struct LessonPlanListParams {
    pub tipe: Option<DocumentType>,
    pub tingkat: Option<i32>,
    pub nama_kelas: Option<String>,
    pub mapel: Option<Mapel>,
    pub semester: Option<Semester>,
    pub tahun_ajaran: Option<String>,
    pub tp: Option<String>,
}

// 用于存储层的内部查询参数，结果按创建时间倒序
#[derive(Debug, Clone, Default)]
pub struct LessonPlanListQuery {
    pub tipe: Option<DocumentType>,
    pub tingkat: Option<i32>,
    pub nama_kelas: Option<String>,
    pub mapel: Option<Mapel>,
    pub semester: Option<Semester>,
    pub tahun_ajaran: Option<String>,
    pub tp: Option<String>,
}

impl From<LessonPlanListParams> for LessonPlanListQuery {
    fn from(params: LessonPlanListParams) -> Self {
        Self {
            tipe: params.tipe,
            tingkat: params.tingkat,
            nama_kelas: params.nama_kelas,
            mapel: params.mapel,
            semester: params.semester,
            tahun_ajaran: params.tahun_ajaran,
            tp: params.tp,
        }
    }
}

// 存储层写入用（已通过校验）
#[derive(Debug, Clone)]
pub struct NewLessonPlan {
    pub judul: String,
    pub tipe: DocumentType,
    pub file_url: String,
    pub file_name: String,
    pub file_path: String,
    pub tingkat: i32,
    pub nama_kelas: Option<String>,
    pub mapel: Mapel,
    pub semester: Semester,
    pub tahun_ajaran: String,
    pub tp: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}
