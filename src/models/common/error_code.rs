use crate::errors::LmsError;

/// 业务错误码（放在 ApiResponse.code 中）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用 1000+
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    StorageUnavailable = 1006,

    // 用户资料 2000+
    ProfileNotFound = 2000,
    ProfileIncomplete = 2001,

    // 作业与提交 3000+
    AssignmentNotFound = 3000,
    AssignmentExpired = 3001,
    SubmissionNotFound = 3002,
    SubmissionAlreadyExists = 3003,
    GradeInvalid = 3004,

    // 文件 4000+
    FileNotFound = 4000,
    FileTypeNotAllowed = 4001,
    FileSizeExceeded = 4002,
    MultifileUploadNotAllowed = 4003,
    FileUploadFailed = 4004,

    // 材料与教学文档 5000+
    MaterialNotFound = 5000,
    LessonPlanNotFound = 5001,
}

impl From<&LmsError> for ErrorCode {
    fn from(err: &LmsError) -> Self {
        match err {
            LmsError::Validation(_) => ErrorCode::ValidationFailed,
            LmsError::NotFound(_) => ErrorCode::NotFound,
            LmsError::Authorization(_) => ErrorCode::Forbidden,
            LmsError::Authentication(_) => ErrorCode::Unauthorized,
            LmsError::TransientIo(_) => ErrorCode::StorageUnavailable,
            _ => ErrorCode::InternalServerError,
        }
    }
}
