//! Clock access and relative-time labels.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

/// Current time in epoch milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let now = js_sys::Date::now() as i64;
        now
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 { format!("1 {unit} ago") } else { format!("{n} {unit}s ago") }
}

/// "just now", "N minutes ago", "N hours ago" or "N days ago".
///
/// Timestamps in the future read as "just now"; a missing timestamp reads as
/// "unknown".
#[must_use]
pub fn relative_time(created_ms: Option<i64>, now_ms: i64) -> String {
    let Some(created) = created_ms else {
        return "unknown".to_owned();
    };
    let secs = now_ms.saturating_sub(created) / 1_000;
    if secs < 60 {
        return "just now".to_owned();
    }
    let minutes = secs / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }
    plural(hours / 24, "day")
}
