use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "profile.ts")]
pub enum UserRole {
    Guru,  // 教师
    Siswa, // 学生
}

impl UserRole {
    pub const GURU: &'static str = "guru";
    pub const SISWA: &'static str = "siswa";

    pub fn teacher_roles() -> &'static [&'static UserRole] {
        &[&Self::Guru]
    }
    pub fn student_roles() -> &'static [&'static UserRole] {
        &[&Self::Siswa]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Guru, &Self::Siswa]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: guru, siswa"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Guru => write!(f, "{}", UserRole::GURU),
            UserRole::Siswa => write!(f, "{}", UserRole::SISWA),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::GURU => Ok(UserRole::Guru),
            UserRole::SISWA => Ok(UserRole::Siswa),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

/// 用户资料（由身份服务创建，本服务只读写展示字段）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "profile.ts")]
pub struct Profile {
    pub id: i64,
    pub nama: String,
    pub role: UserRole,
    pub tingkat: Option<i32>,
    pub nama_kelas: Option<String>,
    /// 学号
    pub nis: Option<String>,
    /// 教师编号
    pub nip: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 对外展示的最小身份信息（提交列表里使用）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "profile.ts")]
pub struct StudentIdentity {
    pub id: i64,
    pub nama: String,
    pub nis: Option<String>,
    pub nama_kelas: Option<String>,
}

impl From<&Profile> for StudentIdentity {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            nama: profile.nama.clone(),
            nis: profile.nis.clone(),
            nama_kelas: profile.nama_kelas.clone(),
        }
    }
}

/// 当前请求的调用者，由 JWT 中间件写入请求扩展
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: i64,
    pub role: UserRole,
    /// 首次登录尚未填写资料时为空
    pub profile: Option<Profile>,
}

impl Actor {
    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Guru
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Siswa
    }
}
