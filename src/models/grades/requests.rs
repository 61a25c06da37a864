use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::GradeRecordKey;
use crate::models::common::pagination::PaginationQuery;
use crate::models::school::{Category, Mapel, Semester};

/// 教师直接录入成绩
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub mapel: Mapel,
    pub semester: Semester,
    pub kategori: Category,
    pub tp: Option<String>,
    pub judul: String,
    pub nilai: f64,
    pub keterangan: Option<String>,
}

/// 成绩历史查询参数（HTTP 请求）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub tingkat: Option<i32>,
    pub nama_kelas: Option<String>,
    pub mapel: Option<Mapel>,
    pub semester: Option<Semester>,
    pub kategori: Option<Category>,
    pub tp: Option<String>,
    pub student_id: Option<i64>,
}

impl GradeListParams {
    pub fn pagination(&self) -> PaginationQuery {
        let defaults = PaginationQuery::default();
        PaginationQuery {
            page: self.page.unwrap_or(defaults.page),
            size: self.size.unwrap_or(defaults.size),
        }
    }
}

/// 成绩汇总查询参数，年级与学期必填
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct RecapParams {
    pub tingkat: i32,
    pub semester: Semester,
    pub nama_kelas: Option<String>,
    pub mapel: Option<Mapel>,
    pub tp: Option<String>,
    pub kategori: Option<Category>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct GradeListQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub tingkat: Option<i32>,
    pub nama_kelas: Option<String>,
    pub mapel: Option<Mapel>,
    pub semester: Option<Semester>,
    pub kategori: Option<Category>,
    pub tp: Option<String>,
    pub student_id: Option<i64>,
}

impl From<&RecapParams> for GradeListQuery {
    fn from(params: &RecapParams) -> Self {
        Self {
            tingkat: Some(params.tingkat),
            semester: Some(params.semester),
            nama_kelas: params.nama_kelas.clone(),
            mapel: params.mapel,
            tp: params.tp.clone(),
            kategori: params.kategori,
            ..Default::default()
        }
    }
}

// 存储层写入用（已通过校验）
#[derive(Debug, Clone)]
pub struct GradeRecordDraft {
    pub key: GradeRecordKey,
    pub tingkat: i32,
    pub nama_kelas: String,
    pub tp: Option<String>,
    pub nilai: i32,
    pub keterangan: Option<String>,
    pub created_by: i64,
    pub at: DateTime<Utc>,
}

/// 评分：提交更新与成绩同步在同一事务内完成
#[derive(Debug, Clone)]
pub struct SubmissionGrade {
    pub submission_id: i64,
    pub value: i32,
    /// 已查看时间（已有则保留）
    pub reviewed_at: DateTime<Utc>,
    pub record: GradeRecordDraft,
}

/// 学生成绩概览查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeSummaryParams {
    pub mapel: Option<Mapel>,
    pub semester: Option<Semester>,
}
