use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::school::{Mapel, Semester};

/// 教师上传给某个班级的学习材料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct Material {
    pub id: i64,
    pub judul: String,
    pub deskripsi: Option<String>,
    pub file_url: String,
    pub file_name: String,
    // 桶内路径，删除时使用
    pub file_path: String,
    pub tingkat: i32,
    pub nama_kelas: String,
    pub mapel: Mapel,
    pub semester: Semester,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
