use chrono::Timelike;

/// Every table's primary key. Assigned by the record store, never reused.
pub type DbId = i64;

/// Wall-clock timestamps as stored in the tables (local time, no offset).
pub type Timestamp = chrono::NaiveDateTime;

/// Format used for every stored timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Current local time truncated to whole seconds, the way it is written to disk.
pub fn now() -> Timestamp {
    let now = chrono::Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Render a timestamp in the stored ISO-8601 form.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
