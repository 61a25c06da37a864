use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    // 学生备注，确认类作业为固定文本
    pub catatan: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    // 教师是否已查看
    pub reviewed: bool,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    // 0-100
    pub grade: Option<i32>,
}
