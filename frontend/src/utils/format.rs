use chrono::{DateTime, Datelike, NaiveDateTime};

/// Formats a date as `dd/mm/yy`.
pub fn format_date(date: &impl Datelike) -> String {
    format!(
        "{:02}/{:02}/{:02}",
        date.day(),
        date.month(),
        date.year().rem_euclid(100)
    )
}

/// Rounds to at most two decimal places, from the exact decimal expansion
/// of `num` rather than a scaled copy.
pub fn format_number(num: f64) -> f64 {
    if !num.is_finite() {
        return num;
    }
    format!("{:.2}", num).parse().unwrap_or(num)
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parses backend timestamps. Accepts RFC 3339, the HTTP-date form JSON
/// encoders use for datetimes (`Thu, 02 Jan 2025 10:30:00 GMT`), and the
/// `YYYY-MM-DD HH:MM:SS[.ffffff]+HH:MM` text the API emits.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok()
}

/// `dd/mm/yy` for a backend timestamp, or the raw text when it cannot be parsed.
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| format_date(&dt.date()))
        .unwrap_or_else(|| raw.to_string())
}
