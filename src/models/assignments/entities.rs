use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::school::{Category, Mapel, Semester};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct Assignment {
    pub id: i64,
    // 作业标题
    pub judul: String,
    pub deskripsi: Option<String>,
    // 教师上传的附件
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub tingkat: i32,
    pub nama_kelas: String,
    pub mapel: Mapel,
    pub semester: Semester,
    pub kategori: Category,
    // 学习目标标签
    pub tp: Option<String>,
    pub deadline: chrono::DateTime<chrono::Utc>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 作业状态，由截止时间与当前时间推导，不落库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "assignment.ts")]
pub enum AssignmentState {
    Open,
    Expired,
}
