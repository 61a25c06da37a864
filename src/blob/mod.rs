//! 文件存储
//!
//! 文件按 bucket 分目录保存。`tugas` 存放教师的作业附件，`submissions` 存放学生提交的文件，
//! `materi` 与 `dokumen` 分别存放学习材料和教学文档。

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::errors::{LmsError, Result};

/// 作业附件
pub const ASSIGNMENT_BUCKET: &str = "tugas";
/// 学生提交
pub const SUBMISSION_BUCKET: &str = "submissions";
/// 学习材料
pub const MATERIAL_BUCKET: &str = "materi";
/// 教学文档
pub const DOCUMENT_BUCKET: &str = "dokumen";

pub const BUCKETS: [&str; 4] = [
    ASSIGNMENT_BUCKET,
    SUBMISSION_BUCKET,
    MATERIAL_BUCKET,
    DOCUMENT_BUCKET,
];

#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// 写入文件，返回公开访问地址
    async fn put(&self, bucket: &str, path: &str, bytes: &[u8]) -> Result<String>;
    /// 读取文件，不存在时返回 NotFound
    async fn get(&self, bucket: &str, path: &str) -> Result<Vec<u8>>;
    /// 删除文件；文件不存在视为成功
    async fn delete(&self, bucket: &str, path: &str) -> Result<()>;
    /// 公开访问地址（不检查文件是否存在）
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// 只保留字母、数字、点、横线与下划线
pub fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// 学生提交文件的存储路径：`submissions/{student}/{ts}_{name}`（相对 bucket）
pub fn submission_path(student_id: i64, timestamp_millis: i64, file_name: &str) -> String {
    format!(
        "{SUBMISSION_BUCKET}/{student_id}/{timestamp_millis}_{}",
        sanitize_file_name(file_name)
    )
}

/// 教师上传文件（作业附件、材料、教学文档）的存储路径
pub fn attachment_path(teacher_id: i64, timestamp_millis: i64, file_name: &str) -> String {
    format!(
        "{teacher_id}/{timestamp_millis}_{}",
        sanitize_file_name(file_name)
    )
}

/// 校验 bucket 与相对路径，拒绝目录穿越
fn checked_relative(bucket: &str, path: &str) -> Result<PathBuf> {
    if !BUCKETS.contains(&bucket) {
        return Err(LmsError::validation(format!("未知的存储桶: {bucket}")));
    }
    let relative = Path::new(path);
    if path.is_empty()
        || path.contains('\\')
        || !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(LmsError::validation(format!("非法的文件路径: {path}")));
    }
    Ok(Path::new(bucket).join(relative))
}

/// 本地磁盘存储
#[derive(Debug, Clone)]
pub struct LocalBlobStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn put(&self, bucket: &str, path: &str, bytes: &[u8]) -> Result<String> {
        let target = self.root.join(checked_relative(bucket, path)?);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| LmsError::transient_io(format!("创建上传目录失败: {e}")))?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| LmsError::transient_io(format!("文件写入失败: {e}")))?;
        debug!("Stored {} bytes at {}", bytes.len(), target.display());
        Ok(self.public_url(bucket, path))
    }

    async fn get(&self, bucket: &str, path: &str) -> Result<Vec<u8>> {
        let target = self.root.join(checked_relative(bucket, path)?);
        match tokio::fs::read(&target).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LmsError::not_found(format!("文件不存在: {bucket}/{path}")))
            }
            Err(e) => Err(LmsError::transient_io(format!("文件读取失败: {e}"))),
        }
    }

    async fn delete(&self, bucket: &str, path: &str) -> Result<()> {
        let target = self.root.join(checked_relative(bucket, path)?);
        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                debug!("Removed {}", target.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LmsError::transient_io(format!("文件删除失败: {e}"))),
        }
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{bucket}/{path}", self.public_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("Laporan Akhir (1).pdf"), "Laporan_Akhir__1_.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(".."), "file");
    }

    #[test]
    fn test_submission_path_layout() {
        assert_eq!(
            submission_path(42, 1_700_000_000_000, "tugas 1.pdf"),
            "submissions/42/1700000000000_tugas_1.pdf"
        );
    }

    #[test]
    fn test_rejects_traversal() {
        assert!(checked_relative(SUBMISSION_BUCKET, "../secret").is_err());
        assert!(checked_relative(SUBMISSION_BUCKET, "/abs/path").is_err());
        assert!(checked_relative("other", "a.pdf").is_err());
        assert!(checked_relative(ASSIGNMENT_BUCKET, "7/1_a.pdf").is_ok());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = LocalBlobStorage::new(dir.path(), "/api/v1/files/");
        let url = blobs
            .put(SUBMISSION_BUCKET, "submissions/1/5_a.txt", b"hello")
            .await
            .unwrap();
        assert_eq!(url, "/api/v1/files/submissions/submissions/1/5_a.txt");
        let bytes = blobs
            .get(SUBMISSION_BUCKET, "submissions/1/5_a.txt")
            .await
            .unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = LocalBlobStorage::new(dir.path(), "/files");
        blobs
            .put(SUBMISSION_BUCKET, "submissions/1/5_a.txt", b"hello")
            .await
            .unwrap();
        blobs
            .delete(SUBMISSION_BUCKET, "submissions/1/5_a.txt")
            .await
            .unwrap();
        let err = blobs
            .get(SUBMISSION_BUCKET, "submissions/1/5_a.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::NotFound(_)));
        blobs
            .delete(SUBMISSION_BUCKET, "submissions/1/5_a.txt")
            .await
            .unwrap();
        assert!(blobs.delete(SUBMISSION_BUCKET, "../x").await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = LocalBlobStorage::new(dir.path(), "/files");
        let err = blobs.get(ASSIGNMENT_BUCKET, "nope.pdf").await.unwrap_err();
        assert!(matches!(err, LmsError::NotFound(_)));
    }
}
