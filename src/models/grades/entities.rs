use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::school::{Category, Mapel, Semester};

/// 成绩记录（成绩册中的一行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeRecord {
    pub id: i64,
    pub student_id: i64,
    pub tingkat: i32,
    pub nama_kelas: String,
    pub mapel: Mapel,
    pub semester: Semester,
    pub kategori: Category,
    pub tp: Option<String>,
    pub judul: String,
    pub nilai: i32,
    pub keterangan: Option<String>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 评分同步时用于查找已有成绩记录的键
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRecordKey {
    pub student_id: i64,
    pub judul: String,
    pub kategori: Category,
    pub mapel: Mapel,
    pub semester: Semester,
}

impl GradeRecordKey {
    pub fn matches(&self, record: &GradeRecord) -> bool {
        record.student_id == self.student_id
            && record.judul == self.judul
            && record.kategori == self.kategori
            && record.mapel == self.mapel
            && record.semester == self.semester
    }
}
