use serde::Serialize;
use ts_rs::TS;

use super::entities::{Assignment, AssignmentState};
use crate::models::submissions::entities::Submission;

/// 教师视角的作业列表项
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct TeacherAssignmentItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub state: AssignmentState,
    pub submission_count: i64,
}

/// 学生视角的作业列表项
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct StudentAssignmentItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub state: AssignmentState,
    /// 倒计时文本，过期后为 "Waktu habis"
    pub countdown: String,
    pub my_submission: Option<Submission>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct TeacherAssignmentListResponse {
    pub items: Vec<TeacherAssignmentItem>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct StudentAssignmentListResponse {
    pub items: Vec<StudentAssignmentItem>,
}
