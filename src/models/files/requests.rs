/// 随表单上传的文件（已读入内存并通过类型校验）
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
