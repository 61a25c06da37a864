use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

/// 标记已查看请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SetReviewedRequest {
    pub reviewed: bool,
}

/// 评分请求（按浮点接收，以便拒绝小数而不是静默截断）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct GradeSubmissionRequest {
    pub grade: f64,
}

/// 学生提交时附带的文件（已读入内存）
#[derive(Debug, Clone)]
pub struct SubmissionFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

// 存储层写入用
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub assignment_id: i64,
    pub student_id: i64,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub catatan: Option<String>,
    pub submitted_at: DateTime<Utc>,
}
