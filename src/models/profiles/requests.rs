use serde::Deserialize;
use ts_rs::TS;

use super::entities::UserRole;

/// 更新当前用户资料请求（角色始终取自令牌）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "profile.ts")]
pub struct UpdateProfileRequest {
    pub nama: String,
    pub tingkat: Option<i32>,
    pub nama_kelas: Option<String>,
    pub nis: Option<String>,
    pub nip: Option<String>,
}

// 存储层写入用
#[derive(Debug, Clone)]
pub struct ProfileUpsert {
    pub id: i64,
    pub nama: String,
    pub role: UserRole,
    pub tingkat: Option<i32>,
    pub nama_kelas: Option<String>,
    pub nis: Option<String>,
    pub nip: Option<String>,
}
