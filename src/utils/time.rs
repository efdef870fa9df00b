use chrono::{DateTime, Utc};

/// 100ns ticks between 1601-01-01 and 1970-01-01 (UTC).
pub const FILETIME_UNIX_EPOCH_TICKS: i64 = 116_444_736_000_000_000;

const TICKS_PER_SECOND: i64 = 10_000_000;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Decodes a Windows FILETIME tick count.
///
/// Only positive values carry a timestamp; AD uses 0 for "not locked".
pub fn from_filetime(ticks: i64) -> Option<DateTime<Utc>> {
    if ticks <= 0 {
        return None;
    }
    let unix_ticks = ticks - FILETIME_UNIX_EPOCH_TICKS;
    let secs = unix_ticks.div_euclid(TICKS_PER_SECOND);
    let nanos = (unix_ticks.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
    DateTime::from_timestamp(secs, nanos)
}

pub fn to_filetime(dt: DateTime<Utc>) -> i64 {
    dt.timestamp() * TICKS_PER_SECOND
        + i64::from(dt.timestamp_subsec_nanos() / 100)
        + FILETIME_UNIX_EPOCH_TICKS
}

/// Directory servers hand Integer8 attributes back as decimal strings.
pub fn parse_filetime(raw: &str) -> Option<DateTime<Utc>> {
    raw.trim().parse::<i64>().ok().and_then(from_filetime)
}
