use jiff::Timestamp;

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;

/// Current time as unix seconds.
pub fn now_secs() -> i64 {
    Timestamp::now().as_second()
}

/// Format a unix timestamp (seconds) into a Hacker News style age label such
/// as "just now", "5 minutes ago", "Yesterday" or "3 months ago".
///
/// Returns an empty string when the time is missing or lies in the future.
pub fn format_timestamp(timestamp: Option<i64>) -> String {
    format_age(timestamp, now_secs())
}

/// Same as [`format_timestamp`] with an explicit reference time.
///
/// Days are the floor of the elapsed seconds, so "Yesterday" covers the whole
/// 24h to 48h window rather than the previous calendar day.
pub fn format_age(timestamp: Option<i64>, now: i64) -> String {
    let Some(ts) = timestamp else {
        return String::new();
    };

    let delta = match now.checked_sub(ts) {
        Some(delta) if delta >= 0 => delta,
        _ => return String::new(),
    };

    let days = delta / DAY;
    let seconds = delta % DAY;

    if days == 0 {
        return match seconds {
            s if s < 10 => "just now".to_string(),
            s if s < MINUTE => format!("{} seconds ago", s),
            s if s < 2 * MINUTE => "1 minute ago".to_string(),
            s if s < HOUR => format!("{} minutes ago", s / MINUTE),
            s if s < 2 * HOUR => "1 hour ago".to_string(),
            s => format!("{} hours ago", s / HOUR),
        };
    }

    match days {
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{} days ago", d),
        d if d < 31 => format!("{} weeks ago", d / 7),
        d if d < 365 => format!("{} months ago", d / 30),
        d => format!("{} years ago", d / 365),
    }
}
