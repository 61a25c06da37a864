use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::school::{Mapel, Semester};

/// 教学文档类型：学年计划、学期计划、课时教案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "lesson_plan.ts")]
pub enum DocumentType {
    Prota,
    Prosem,
    Rpp,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Prota => "prota",
            DocumentType::Prosem => "prosem",
            DocumentType::Rpp => "rpp",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prota" => Ok(DocumentType::Prota),
            "prosem" => Ok(DocumentType::Prosem),
            "rpp" => Ok(DocumentType::Rpp),
            _ => Err(format!("Invalid document type: {s}")),
        }
    }
}

/// 教师的教学文档（默认 RPP）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "lesson_plan.ts")]
pub struct LessonPlan {
    pub id: i64,
    pub judul: String,
    pub tipe: DocumentType,
    pub file_url: String,
    pub file_name: String,
    pub file_path: String,
    pub tingkat: i32,
    pub nama_kelas: Option<String>,
    pub mapel: Mapel,
    pub semester: Semester,
    /// 学年，如 "2025/2026"
    pub tahun_ajaran: String,
    pub tp: Option<String>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
