use chrono::{DateTime, Utc};

/// 当前 Unix 时间戳（秒）
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// 将数据库中的时间戳转换为 UTC 时间
pub fn from_timestamp(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
