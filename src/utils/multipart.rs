//! multipart 表单读取
//!
//! 只接受一个 `file` 字段；扩展名、文件头与大小在读取过程中校验，其余文本字段一并收集。

use std::collections::HashMap;
use std::str::FromStr;

use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;

use crate::config::UploadConfig;
use crate::models::ErrorCode;
use crate::utils::file_magic::{extension_of, validate_magic_bytes};

// 文本字段的长度上限
const MAX_TEXT_FIELD_LEN: usize = 4 * 1024;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct MultipartForm {
    pub file: Option<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl MultipartForm {
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    /// 可选字段；缺失或空白视为未设置
    pub fn parse_optional<T: FromStr>(&self, name: &str) -> Result<Option<T>, String> {
        match self.fields.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
            None => Ok(None),
            Some(value) => value
                .parse::<T>()
                .map(Some)
                .map_err(|_| format!("Isian {name} tidak valid")),
        }
    }

    pub fn parse_required<T: FromStr>(&self, name: &str) -> Result<T, String> {
        self.parse_optional(name)?
            .ok_or_else(|| format!("Isian {name} wajib diisi"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadRejection {
    MultipleFiles,
    TypeNotAllowed(String),
    ContentMismatch,
    TooLarge(usize),
    FieldTooLong(String),
    Malformed(String),
}

impl UploadRejection {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MultipleFiles => ErrorCode::MultifileUploadNotAllowed,
            Self::TypeNotAllowed(_) | Self::ContentMismatch => ErrorCode::FileTypeNotAllowed,
            Self::TooLarge(_) => ErrorCode::FileSizeExceeded,
            Self::FieldTooLong(_) | Self::Malformed(_) => ErrorCode::BadRequest,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::MultipleFiles => "Hanya satu file yang dapat diunggah".to_string(),
            Self::TypeNotAllowed(ext) => format!("Tipe file {ext} tidak diizinkan"),
            Self::ContentMismatch => "Isi file tidak sesuai dengan ekstensinya".to_string(),
            Self::TooLarge(max) => format!("Ukuran file melebihi batas {max} byte"),
            Self::FieldTooLong(name) => format!("Isian {name} terlalu panjang"),
            Self::Malformed(e) => format!("Form tidak valid: {e}"),
        }
    }
}

fn check_extension(file_name: &str, allowed: &[String]) -> Result<String, UploadRejection> {
    let extension = extension_of(file_name).unwrap_or_default();
    if extension.is_empty() || !allowed.iter().any(|t| t.to_lowercase() == extension) {
        return Err(UploadRejection::TypeNotAllowed(if extension.is_empty() {
            file_name.to_string()
        } else {
            extension
        }));
    }
    Ok(extension)
}

/// 读取整个表单；文件内容保存在内存中，大小受 `upload.max_size` 限制
pub async fn read_multipart(
    mut payload: Multipart,
    upload: &UploadConfig,
) -> Result<MultipartForm, UploadRejection> {
    let mut form = MultipartForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| UploadRejection::Malformed(e.to_string()))?
    {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let file_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        if name == "file" {
            if form.file.is_some() {
                return Err(UploadRejection::MultipleFiles);
            }
            let file_name = file_name.unwrap_or_default();
            let extension = check_extension(&file_name, &upload.allowed_types)?;
            let content_type = field.content_type().map(|ct| ct.to_string());

            let mut bytes = Vec::new();
            let mut first_chunk = true;
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| UploadRejection::Malformed(e.to_string()))?;
                if first_chunk && !data.is_empty() {
                    first_chunk = false;
                    if !validate_magic_bytes(&data, &extension) {
                        return Err(UploadRejection::ContentMismatch);
                    }
                }
                if bytes.len() + data.len() > upload.max_size {
                    return Err(UploadRejection::TooLarge(upload.max_size));
                }
                bytes.extend_from_slice(&data);
            }

            form.file = Some(UploadedFile {
                file_name,
                content_type,
                bytes,
            });
        } else {
            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| UploadRejection::Malformed(e.to_string()))?;
                if value.len() + data.len() > MAX_TEXT_FIELD_LEN {
                    return Err(UploadRejection::FieldTooLong(name));
                }
                value.extend_from_slice(&data);
            }
            let value = String::from_utf8(value)
                .map_err(|_| UploadRejection::Malformed(format!("{name} bukan UTF-8")))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        UploadConfig::default().allowed_types
    }

    #[test]
    fn test_check_extension() {
        assert_eq!(
            check_extension("Laporan.PDF", &allowed()),
            Ok(".pdf".to_string())
        );
        assert_eq!(
            check_extension("virus.exe", &allowed()),
            Err(UploadRejection::TypeNotAllowed(".exe".to_string()))
        );
        assert!(check_extension("tanpa-ekstensi", &allowed()).is_err());
    }

    #[test]
    fn test_rejection_codes() {
        assert_eq!(
            UploadRejection::MultipleFiles.error_code(),
            ErrorCode::MultifileUploadNotAllowed
        );
        assert_eq!(
            UploadRejection::ContentMismatch.error_code(),
            ErrorCode::FileTypeNotAllowed
        );
        assert_eq!(
            UploadRejection::TooLarge(10).error_code(),
            ErrorCode::FileSizeExceeded
        );
    }

    #[test]
    fn test_parse_fields() {
        let mut form = MultipartForm::default();
        form.fields.insert("tingkat".to_string(), " 11 ".to_string());
        form.fields.insert("kelas".to_string(), "  ".to_string());
        form.fields.insert("tahun".to_string(), "abc".to_string());

        assert_eq!(form.parse_required::<i32>("tingkat"), Ok(11));
        assert_eq!(form.parse_optional::<i32>("kelas"), Ok(None));
        assert!(form.parse_required::<String>("kelas").is_err());
        assert!(form.parse_required::<i32>("tahun").is_err());
        assert!(form.parse_required::<i32>("hilang").is_err());
    }
}
