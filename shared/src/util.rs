use chrono::Utc;
use rand::Rng;

/// Current timestamp in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generate a snowflake-style ID: millisecond timestamp + random suffix.
/// Sortable by creation time, unique enough for record keys on a single node.
pub fn snowflake_id() -> String {
    let ts = now_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..10000);
    format!("{}{:04}", ts, suffix)
}
