//! 成绩汇总
//!
//! 按 (学生, 学习目标) 分区，分区内按类别求简单平均；总平均对分区内全部成绩展开求平均，
//! 而不是对类别平均再求平均。没有成绩的类别记为“无数据”，不按 0 计入。

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use tracing::warn;

use crate::models::grades::entities::GradeRecord;
use crate::models::grades::responses::{CategoryAverage, RecapRow};
use crate::models::profiles::entities::Profile;
use crate::models::school::{Category, NO_TP};

/// 学生资料缺失时的显示名
pub const UNKNOWN_STUDENT: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Mean {
    sum: i64,
    count: i64,
}

impl Mean {
    fn push(&mut self, value: i32) {
        self.sum += i64::from(value);
        self.count += 1;
    }

    fn value(&self) -> Option<f64> {
        if self.count > 0 {
            Some(self.sum as f64 / self.count as f64)
        } else {
            None
        }
    }
}

/// 一位小数；无数据时为 "-"
pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(v) => format!("{v:.1}"),
        None => "-".to_string(),
    }
}

/// 姓名按 Unicode 排序规则（根区域）比较，再按学生 ID、学习目标打破平局
fn compare_rows(
    collator: Option<&CollatorBorrowed<'static>>,
    a: &RecapRow,
    b: &RecapRow,
) -> Ordering {
    let by_name = match collator {
        Some(collator) => collator.compare(&a.nama, &b.nama),
        None => a.nama.to_lowercase().cmp(&b.nama.to_lowercase()),
    };
    by_name
        .then_with(|| a.nama.cmp(&b.nama))
        .then_with(|| a.student_id.cmp(&b.student_id))
        .then_with(|| a.tp.cmp(&b.tp))
}

pub fn build_recap(records: &[GradeRecord], profiles: &HashMap<i64, Profile>) -> Vec<RecapRow> {
    let mut partitions: BTreeMap<(i64, String), Vec<&GradeRecord>> = BTreeMap::new();
    for record in records {
        let tp = record
            .tp
            .as_deref()
            .filter(|tp| !tp.trim().is_empty())
            .unwrap_or(NO_TP)
            .to_string();
        partitions
            .entry((record.student_id, tp))
            .or_default()
            .push(record);
    }

    let mut rows: Vec<RecapRow> = partitions
        .into_iter()
        .map(|((student_id, tp), grades)| {
            let mut by_category: HashMap<Category, Mean> = HashMap::new();
            let mut overall = Mean::default();
            for grade in &grades {
                by_category.entry(grade.kategori).or_default().push(grade.nilai);
                overall.push(grade.nilai);
            }

            let categories = Category::ALL
                .iter()
                .map(|kategori| {
                    let mean = by_category.get(kategori).copied().unwrap_or_default();
                    CategoryAverage {
                        kategori: *kategori,
                        count: mean.count,
                        average: mean.value(),
                        label: format_average(mean.value()),
                    }
                })
                .collect();

            let profile = profiles.get(&student_id);
            let nama = profile
                .map(|p| p.nama.clone())
                .unwrap_or_else(|| UNKNOWN_STUDENT.to_string());
            let nama_kelas = profile
                .and_then(|p| p.nama_kelas.clone())
                .or_else(|| grades.first().map(|g| g.nama_kelas.clone()))
                .unwrap_or_default();

            RecapRow {
                student_id,
                nama,
                nis: profile.and_then(|p| p.nis.clone()),
                nama_kelas,
                tp,
                categories,
                overall_count: overall.count,
                overall_average: overall.value(),
                overall_label: format_average(overall.value()),
            }
        })
        .collect();

    let collator = match Collator::try_new(Default::default(), CollatorOptions::default()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!("Collator unavailable, falling back to case-insensitive order: {}", e);
            None
        }
    };
    rows.sort_by(|a, b| compare_rows(collator.as_ref(), a, b));
    rows
}
