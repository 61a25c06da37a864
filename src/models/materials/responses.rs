use serde::Serialize;
use ts_rs::TS;

use super::entities::Material;

/// 材料与上传者姓名
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct MaterialItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub material: Material,
    /// 上传者资料缺失时为空
    pub uploader: Option<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "material.ts")]
pub struct MaterialListResponse {
    pub items: Vec<MaterialItem>,
}
