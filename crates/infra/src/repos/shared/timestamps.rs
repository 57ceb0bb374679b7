use chrono::{DateTime, TimeZone, Utc};

/// Converts a timestamp in millis into a `timestamptz` compatible value
pub fn to_datetime(ts: i64) -> anyhow::Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ts)
        .single()
        .ok_or_else(|| anyhow::anyhow!("Timestamp: {} is out of range", ts))
}
