use serde::Serialize;
use ts_rs::TS;

use super::entities::GradeRecord;
use crate::models::PaginationInfo;
use crate::models::school::{Category, GradeBand};

/// 某类别的平均分；没有成绩时 average 为空，而不是 0
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct CategoryAverage {
    pub kategori: Category,
    pub count: i64,
    pub average: Option<f64>,
    /// 一位小数，或 "-"
    pub label: String,
}

/// 汇总表的一行：一个学生在一个学习目标下的成绩
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct RecapRow {
    pub student_id: i64,
    pub nama: String,
    pub nis: Option<String>,
    pub nama_kelas: String,
    /// 无学习目标时为 "-"
    pub tp: String,
    pub categories: Vec<CategoryAverage>,
    pub overall_count: i64,
    pub overall_average: Option<f64>,
    pub overall_label: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct RecapResponse {
    pub rows: Vec<RecapRow>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<GradeRecord>,
    pub pagination: PaginationInfo,
}

/// 带等级反馈的成绩
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradedItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub record: GradeRecord,
    pub band: GradeBand,
    pub feedback: String,
}

/// 学生成绩概览
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct StudentGradeSummary {
    pub count: i64,
    pub average: Option<f64>,
    pub highest: Option<i32>,
    pub lowest: Option<i32>,
    pub items: Vec<GradedItem>,
}
