/// 上传文件可能的内容类别（按文件头判断）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    /// 旧版 Office（OLE 复合文档）
    OleDocument,
    /// 新版 Office 与 zip 同为 ZIP 容器
    ZipContainer,
    Png,
    Jpeg,
    /// 纯文本，不检查文件头
    PlainText,
}

impl FileKind {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            ".pdf" => Some(Self::Pdf),
            ".doc" | ".xls" | ".ppt" => Some(Self::OleDocument),
            ".docx" | ".xlsx" | ".pptx" | ".zip" => Some(Self::ZipContainer),
            ".png" => Some(Self::Png),
            ".jpg" | ".jpeg" => Some(Self::Jpeg),
            ".txt" | ".csv" | ".md" => Some(Self::PlainText),
            _ => None,
        }
    }

    pub fn matches(&self, head: &[u8]) -> bool {
        match self {
            Self::Pdf => head.starts_with(b"%PDF"),
            Self::OleDocument => {
                head.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
            }
            Self::ZipContainer => head.starts_with(&[0x50, 0x4B, 0x03, 0x04]),
            Self::Png => head.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            Self::Jpeg => head.starts_with(&[0xFF, 0xD8, 0xFF]),
            Self::PlainText => true,
        }
    }
}

/// 小写扩展名（含点号），没有扩展名时为 None
pub fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// 文件头是否与扩展名相符；空内容与未知扩展名一律不通过
pub fn validate_magic_bytes(head: &[u8], extension: &str) -> bool {
    if head.is_empty() {
        return false;
    }
    FileKind::from_extension(extension).is_some_and(|kind| kind.matches(head))
}
