// src/text.rs
//! Small text helpers used while adapting API records into display items.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Reading speed used for report reading-time estimates.
pub const DEFAULT_WPM: u32 = 230;

const SV_MONTHS: [&str; 12] = [
    "jan.", "feb.", "mars", "apr.", "maj", "juni", "juli", "aug.", "sep.", "okt.", "nov.", "dec.",
];

fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // RSS-style dates, e.g. `Wed, 05 Nov 2025 14:30:00 GMT`.
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Offset-less timestamps are taken as UTC.
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Medium date + short time in the Swedish locale, e.g. `5 nov. 2025 14:30` (UTC).
/// Input that does not parse is returned unchanged.
pub fn format_date(iso: &str) -> String {
    match parse_iso(iso) {
        Some(dt) => format!(
            "{} {} {} {:02}:{:02}",
            dt.day(),
            SV_MONTHS[dt.month0() as usize],
            dt.year(),
            dt.hour(),
            dt.minute()
        ),
        None => iso.to_string(),
    }
}

/// Display timestamp for a record: its own date field wins over `created_at`.
pub fn display_time(date: Option<&str>, created_at: Option<&str>) -> String {
    date.filter(|d| !d.is_empty())
        .or(created_at)
        .map(format_date)
        .unwrap_or_default()
}

/// Hostname of `url` without a leading `www.`; `None` when the URL does not parse
/// or carries no host.
pub fn hostname(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// Whole minutes needed to read `text`, rounded up, never less than one.
pub fn estimate_reading_time(text: &str, words_per_minute: u32) -> u32 {
    let words = text.split_whitespace().count() as u32;
    let wpm = words_per_minute.max(1);
    words.div_ceil(wpm).max(1)
}

/// Card-view truncation: at most `max_chars` characters, cut at a word boundary
/// when one exists, with a trailing ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let head = match cut.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };
    format!("{}…", head.trim_end_matches(|c: char| c.is_whitespace() || c == ','))
}
