use serde::Serialize;
use ts_rs::TS;

use super::entities::LessonPlan;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "lesson_plan.ts")]
pub struct LessonPlanListResponse {
    pub items: Vec<LessonPlan>,
}
