//! 作业生命周期：开放 / 过期只由截止时间推导

use chrono::{DateTime, Duration, SubsecRound, Utc};

use crate::errors::{LmsError, Result};
use crate::models::assignments::entities::AssignmentState;

/// 未指定截止时间时的默认期限（天）
pub const DEFAULT_DEADLINE_DAYS: i64 = 7;

pub const EXPIRED_LABEL: &str = "Waktu habis";

pub fn state_at(deadline: DateTime<Utc>, now: DateTime<Utc>) -> AssignmentState {
    if now < deadline {
        AssignmentState::Open
    } else {
        AssignmentState::Expired
    }
}

/// 距截止的剩余时间，过期后为零
pub fn remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (deadline - now).max(Duration::zero())
}

/// 倒计时文本：`{天}h {时}j {分}m {秒}d`
pub fn countdown_label(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let left = remaining(deadline, now);
    if left.is_zero() {
        return EXPIRED_LABEL.to_string();
    }
    let secs = left.num_seconds();
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    format!("{days}h {hours}j {minutes}m {seconds}d")
}

/// 解析创建作业时的截止时间
///
/// 绝对时间与相对偏移不能同时给出；都未给出时默认 7 天后。结果截断到整秒，且必须晚于当前时间。
pub fn resolve_deadline(
    absolute: Option<DateTime<Utc>>,
    days: Option<i64>,
    hours: Option<i64>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>> {
    let deadline = match (absolute, days, hours) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
            return Err(LmsError::validation(
                "Tenggat waktu: gunakan tanggal atau durasi, bukan keduanya",
            ));
        }
        (Some(at), None, None) => at,
        (None, days, hours) => {
            let days = days.unwrap_or(if hours.is_some() { 0 } else { DEFAULT_DEADLINE_DAYS });
            let hours = hours.unwrap_or(0);
            if days < 0 || hours < 0 {
                return Err(LmsError::validation("Durasi tenggat tidak boleh negatif"));
            }
            now + Duration::days(days) + Duration::hours(hours)
        }
    };
    // 存储只保留到秒
    let deadline = deadline.trunc_subsecs(0);

    if deadline <= now {
        return Err(LmsError::validation(
            "Tenggat waktu harus di masa mendatang",
        ));
    }
    Ok(deadline)
}
