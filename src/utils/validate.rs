use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::school::is_valid_tp;

static NUMBER_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4,20}$").expect("Invalid number id regex"));

static TAHUN_AJARAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})/([0-9]{4})$").expect("Invalid school year regex"));

pub const MAX_JUDUL_LEN: usize = 200;
pub const MAX_NAMA_LEN: usize = 100;

/// 分数必须是 0-100 的整数（拒绝小数，而不是截断）
pub fn validate_grade_value(value: f64) -> Result<i32, &'static str> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err("Nilai harus berupa bilangan bulat");
    }
    if !(0.0..=100.0).contains(&value) {
        return Err("Nilai harus antara 0 - 100");
    }
    Ok(value as i32)
}

pub fn validate_judul(judul: &str) -> Result<(), &'static str> {
    let trimmed = judul.trim();
    if trimmed.is_empty() {
        return Err("Judul tidak boleh kosong");
    }
    if trimmed.chars().count() > MAX_JUDUL_LEN {
        return Err("Judul terlalu panjang");
    }
    Ok(())
}

pub fn validate_nama(nama: &str) -> Result<(), &'static str> {
    let trimmed = nama.trim();
    if trimmed.is_empty() {
        return Err("Nama tidak boleh kosong");
    }
    if trimmed.chars().count() > MAX_NAMA_LEN {
        return Err("Nama terlalu panjang");
    }
    Ok(())
}

/// NIS / NIP：4-20 位数字
pub fn validate_number_id(value: &str) -> Result<(), &'static str> {
    if !NUMBER_ID_RE.is_match(value.trim()) {
        return Err("NIS/NIP harus berupa 4-20 digit angka");
    }
    Ok(())
}

/// 学年格式为 "2025/2026"，后一年必须紧接前一年
pub fn validate_tahun_ajaran(value: &str) -> Result<String, &'static str> {
    let trimmed = value.trim();
    let caps = TAHUN_AJARAN_RE
        .captures(trimmed)
        .ok_or("Tahun ajaran harus berformat YYYY/YYYY")?;
    let start: i32 = caps[1].parse().map_err(|_| "Tahun ajaran tidak valid")?;
    let end: i32 = caps[2].parse().map_err(|_| "Tahun ajaran tidak valid")?;
    if end != start + 1 {
        return Err("Tahun ajaran harus berurutan, misalnya 2025/2026");
    }
    Ok(trimmed.to_string())
}

/// 规范化学习目标：空串视为未设置
pub fn normalize_tp(tp: Option<&str>) -> Result<Option<String>, &'static str> {
    match tp.map(str::trim).filter(|tp| !tp.is_empty()) {
        None => Ok(None),
        Some(tp) if is_valid_tp(tp) => Ok(Some(tp.to_string())),
        Some(_) => Err("TP tidak dikenal"),
    }
}

/// 去掉首尾空白，空串视为未设置
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
