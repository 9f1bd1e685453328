//! 日期解析与展示

use chrono::{DateTime, NaiveDate};

/// 解析后端返回的 ISO-8601 时间戳，取其日期部分
///
/// 同时接受带时区的 RFC 3339 字符串和纯日期 `YYYY-MM-DD`。
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// 将时间戳格式化为用于展示的日期，如 `Mar 5, 2024`
pub fn format_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|date| date.format("%b %-d, %Y").to_string())
}
