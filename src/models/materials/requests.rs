use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::school::{Mapel, Semester};

/// 上传材料时的表单字段（multipart 文本字段）
#[derive(Debug, Clone)]
pub struct CreateMaterialRequest {
    pub judul: String,
    pub deskripsi: Option<String>,
    pub tingkat: i32,
    pub nama_kelas: String,
    pub mapel: Mapel,
    pub semester: Semester,
}

/// 材料列表查询参数；学生只按自己的班级查看，年级与班级参数被忽略
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct MaterialListParams {
    pub tingkat: Option<i32>,
    pub nama_kelas: Option<String>,
    pub mapel: Option<Mapel>,
    pub semester: Option<Semester>,
    /// 按标题搜索（不区分大小写）
    pub q: Option<String>,
}

// 用于存储层的内部查询参数，结果按创建时间倒序
#[derive(Debug, Clone, Default)]
pub struct MaterialListQuery {
    pub tingkat: Option<i32>,
    pub nama_kelas: Option<String>,
    pub mapel: Option<Mapel>,
    pub semester: Option<Semester>,
}

// 存储层写入用（已通过校验）
#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub judul: String,
    pub deskripsi: Option<String>,
    pub file_url: String,
    pub file_name: String,
    pub file_path: String,
    pub tingkat: i32,
    pub nama_kelas: String,
    pub mapel: Mapel,
    pub semester: Semester,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}
