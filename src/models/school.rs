//! 学校相关的枚举与常量（年级、班级、科目、学期、评价类别、学习目标）

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 年级与罗马数字标签
pub const TINGKAT_OPTIONS: [(i32, &str); 3] = [(10, "X"), (11, "XI"), (12, "XII")];

/// 学习目标（TP）标签
pub const TP_OPTIONS: [&str; 4] = ["TP1", "TP2", "TP3", "TP4"];

/// 缺少学习目标时的分组标签
pub const NO_TP: &str = "-";

/// 确认类提交写入的固定备注
pub const CONFIRMATION_NOTE: &str = "Siswa mengonfirmasi telah menyelesaikan";

// 每个年级的平行班数量
fn kelas_count(tingkat: i32) -> usize {
    match tingkat {
        10 => 11,
        11 => 10,
        12 => 11,
        _ => 0,
    }
}

pub fn tingkat_label(tingkat: i32) -> Option<&'static str> {
    TINGKAT_OPTIONS
        .iter()
        .find(|(value, _)| *value == tingkat)
        .map(|(_, label)| *label)
}

/// 某年级的全部班级名，如 "X 1" .. "X 11"
pub fn kelas_options(tingkat: i32) -> Vec<String> {
    let Some(label) = tingkat_label(tingkat) else {
        return Vec::new();
    };
    (1..=kelas_count(tingkat))
        .map(|i| format!("{label} {i}"))
        .collect()
}

pub fn is_valid_kelas(tingkat: i32, nama_kelas: &str) -> bool {
    kelas_options(tingkat).iter().any(|k| k == nama_kelas)
}

/// 从班级名推断年级："XII 3" → 12，"XI 5" → 11，其余 → 10
pub fn tingkat_from_kelas(nama_kelas: &str) -> i32 {
    if nama_kelas.starts_with("XII") {
        12
    } else if nama_kelas.starts_with("XI") {
        11
    } else {
        10
    }
}

pub fn is_valid_tp(tp: &str) -> bool {
    TP_OPTIONS.contains(&tp)
}

/// 科目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "school.ts")]
pub enum Mapel {
    #[serde(rename = "Sejarah")]
    Sejarah,
    /// Sejarah Tingkat Lanjut
    #[serde(rename = "STL")]
    Stl,
}

impl Mapel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mapel::Sejarah => "Sejarah",
            Mapel::Stl => "STL",
        }
    }

    /// X 年级只开设 Sejarah，XI 和 XII 另有 STL
    pub fn options_for(tingkat: i32) -> &'static [Mapel] {
        if tingkat == 10 {
            &[Mapel::Sejarah]
        } else {
            &[Mapel::Sejarah, Mapel::Stl]
        }
    }

    pub fn is_offered_for(&self, tingkat: i32) -> bool {
        Self::options_for(tingkat).contains(self)
    }
}

impl std::fmt::Display for Mapel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Mapel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sejarah" => Ok(Mapel::Sejarah),
            "STL" => Ok(Mapel::Stl),
            _ => Err(format!("Invalid mapel: {s}")),
        }
    }
}

/// 学期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "school.ts")]
pub enum Semester {
    Ganjil,
    Genap,
}

impl Semester {
    pub fn as_str(&self) -> &'static str {
        match self {
            Semester::Ganjil => "Ganjil",
            Semester::Genap => "Genap",
        }
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ganjil" => Ok(Semester::Ganjil),
            "Genap" => Ok(Semester::Genap),
            _ => Err(format!("Invalid semester: {s}")),
        }
    }
}

/// 学生提交方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionMode {
    /// 必须上传文件
    FileRequired,
    /// 文件可选
    FileOptional,
    /// 仅确认完成，不接受文件
    ConfirmationOnly,
}

/// 评价类别（Kategori）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export, export_to = "school.ts")]
pub enum Category {
    #[serde(rename = "Tugas")]
    Tugas,
    #[serde(rename = "Ulangan Harian")]
    UlanganHarian,
    #[serde(rename = "UTS")]
    Uts,
    #[serde(rename = "UAS")]
    Uas,
    #[serde(rename = "Praktik")]
    Praktik,
}

impl Category {
    /// 汇总表中的列顺序
    pub const ALL: [Category; 5] = [
        Category::Tugas,
        Category::UlanganHarian,
        Category::Uts,
        Category::Uas,
        Category::Praktik,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tugas => "Tugas",
            Category::UlanganHarian => "Ulangan Harian",
            Category::Uts => "UTS",
            Category::Uas => "UAS",
            Category::Praktik => "Praktik",
        }
    }

    pub fn submission_mode(&self) -> SubmissionMode {
        match self {
            Category::Tugas => SubmissionMode::FileRequired,
            Category::UlanganHarian => SubmissionMode::FileOptional,
            Category::Uts | Category::Uas | Category::Praktik => SubmissionMode::ConfirmationOnly,
        }
    }

    pub fn is_confirmation_only(&self) -> bool {
        self.submission_mode() == SubmissionMode::ConfirmationOnly
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Invalid kategori: {s}"))
    }
}

/// 成绩等级（用于学生端反馈）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "school.ts")]
pub enum GradeBand {
    SangatBaik,
    Baik,
    Cukup,
    PerluPeningkatan,
}

impl GradeBand {
    pub fn of(nilai: i32) -> Self {
        match nilai {
            n if n >= 90 => GradeBand::SangatBaik,
            n if n >= 75 => GradeBand::Baik,
            n if n >= 60 => GradeBand::Cukup,
            _ => GradeBand::PerluPeningkatan,
        }
    }

    pub fn feedback(&self) -> &'static str {
        match self {
            GradeBand::SangatBaik => "Sangat Baik",
            GradeBand::Baik => "Baik",
            GradeBand::Cukup => "Cukup",
            GradeBand::PerluPeningkatan => "Perlu Peningkatan",
        }
    }
}
