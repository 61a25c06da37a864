use serde::Serialize;
use ts_rs::TS;

use super::entities::Submission;
use crate::models::assignments::entities::Assignment;
use crate::models::grades::entities::GradeRecord;
use crate::models::profiles::entities::StudentIdentity;

/// 未知班级的分组名
pub const UNKNOWN_CLASS: &str = "Tanpa Kelas";

/// 提交与提交者
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionWithStudent {
    #[serde(flatten)]
    #[ts(flatten)]
    pub submission: Submission,
    pub student: StudentIdentity,
}

/// 按班级分组的提交
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionGroup {
    pub nama_kelas: String,
    pub submissions: Vec<SubmissionWithStudent>,
}

/// 教师查看某作业的全部提交
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct AssignmentSubmissionsResponse {
    pub assignment: Assignment,
    pub total: i64,
    pub groups: Vec<SubmissionGroup>,
}

/// 评分结果：更新后的提交与同步的成绩记录
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct GradeSubmissionResponse {
    pub submission: Submission,
    pub grade_record: GradeRecord,
    /// true 表示新建了成绩记录，false 表示覆盖已有记录
    pub record_created: bool,
}
