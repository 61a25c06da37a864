use serde::Serialize;
use ts_rs::TS;

/// 上传结果
#[derive(Serialize, TS)]
#[ts(export, export_to = "file.ts")]
pub struct FileUploadResponse {
    /// 存储桶
    pub bucket: String,
    /// 桶内路径
    pub path: String,
    /// 公开访问地址
    pub url: String,
    /// 原始文件名
    pub file_name: String,
    /// 文件大小(字节)
    pub size: i64,
    /// 上传时间
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
