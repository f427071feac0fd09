use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// CJK punctuation the feeds routinely carry; ASCII punctuation is handled by
/// `char::is_ascii_punctuation`.
const CJK_PUNCT: &str = "\u{ff0c}\u{3002}\u{ff1b}\u{ff1a}\u{ff1f}\u{ff01}\u{201c}\u{201d}\u{2018}\u{2019}\u{ff08}\u{ff09}\u{300a}\u{300b}\u{3001}\u{2014}\u{2026}";

/// Canonical text form used for dedup keys and keyword matching: lowercase,
/// punctuation replaced by spaces, whitespace runs collapsed, trimmed.
/// Idempotent.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let replaced: String = lowered
        .chars()
        .map(|c| {
            if c.is_ascii_punctuation() || CJK_PUNCT.contains(c) {
                ' '
            } else {
                c
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a timestamp of unknown textual format into a UTC point in time.
/// Tries RFC 3339, RFC 2822, then common naive formats (taken as UTC).
/// Unparseable input yields None rather than an error.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }
    for fmt in &["%Y-%m-%d", "%d %B %Y", "%B %d, %Y", "%b %d, %Y"] {
        if let Ok(nd) = NaiveDate::parse_from_str(value, fmt) {
            return Some(Utc.from_utc_datetime(&nd.and_hms_opt(0, 0, 0)?));
        }
    }
    None
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

/// A date is within the window iff it is >= now minus `days`; an absent date
/// is never within range.
pub fn within_days(date: Option<&DateTime<Utc>>, days: i64) -> bool {
    match date {
        Some(dt) => *dt >= days_ago(days),
        None => false,
    }
}

/// Canonical link form: https scheme, no trailing slash.
pub fn normalize_url(url: &str) -> String {
    let mut url = url.trim().to_string();
    if let Some(rest) = url.strip_prefix("http://") {
        url = format!("https://{}", rest);
    }
    if url.ends_with('/') {
        url.pop();
    }
    url
}

/// Report-facing date rendering: YYYY-MM-DD in UTC, empty when absent.
pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}
