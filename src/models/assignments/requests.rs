use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::school::{Category, Mapel, Semester};

/// 创建作业请求
///
/// 截止时间二选一：`deadline` 绝对时间，或 `deadline_days` + `deadline_hours` 相对当前时间。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct CreateAssignmentRequest {
    pub judul: String,
    pub deskripsi: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub tingkat: i32,
    pub nama_kelas: String,
    pub mapel: Mapel,
    pub semester: Semester,
    pub kategori: Category,
    pub tp: Option<String>,
    pub deadline: Option<DateTime<Utc>>, // ISO 8601 格式
    pub deadline_days: Option<i64>,
    pub deadline_hours: Option<i64>,
}

/// 作业列表查询参数（HTTP 请求，教师视角）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentListParams {
    pub tingkat: Option<i32>,
    pub nama_kelas: Option<String>,
    pub mapel: Option<Mapel>,
    pub semester: Option<Semester>,
    pub kategori: Option<Category>,
}

// 用于存储层的内部查询参数，结果按截止时间升序
#[derive(Debug, Clone, Default)]
pub struct AssignmentListQuery {
    pub tingkat: Option<i32>,
    pub nama_kelas: Option<String>,
    pub mapel: Option<Mapel>,
    pub semester: Option<Semester>,
    pub kategori: Option<Category>,
    pub created_by: Option<i64>,
}

impl From<AssignmentListParams> for AssignmentListQuery {
    fn from(params: AssignmentListParams) -> Self {
        Self {
            tingkat: params.tingkat,
            nama_kelas: params.nama_kelas,
            mapel: params.mapel,
            semester: params.semester,
            kategori: params.kategori,
            created_by: None,
        }
    }
}

// 存储层写入用（已通过校验）
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub judul: String,
    pub deskripsi: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub tingkat: i32,
    pub nama_kelas: String,
    pub mapel: Mapel,
    pub semester: Semester,
    pub kategori: Category,
    pub tp: Option<String>,
    pub deadline: DateTime<Utc>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}
