use chrono::{DateTime, Local, TimeZone, Utc};

/// Format a duration in seconds as H:MM:SS, or M:SS under an hour
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Format an epoch timestamp (seconds) in local time (YYYY-MM-DD HH:MM:SS)
pub fn format_instant(epoch_secs: f64) -> String {
    let whole = epoch_secs.floor();
    let nanos = ((epoch_secs - whole) * 1e9) as u32;

    match Utc.timestamp_opt(whole as i64, nanos).single() {
        Some(utc) => {
            let local: DateTime<Local> = utc.into();
            local.format("%Y-%m-%d %H:%M:%S").to_string()
        }
        None => format!("{:.3}", epoch_secs),
    }
}

/// Format a UTC timestamp in local time (YYYY-MM-DD HH:MM)
pub fn format_time(time: DateTime<Utc>) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}
