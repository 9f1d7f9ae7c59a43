//! Wall-clock helpers

/// Current time as Unix seconds, the unit used by token `exp` claims
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
