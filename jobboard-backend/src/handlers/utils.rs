use chrono::{SecondsFormat, Utc};

/// Parse a positive integer query parameter, falling back to `fallback`
/// when it is absent, zero, or not a number.
pub fn positive_or_default(raw: Option<&str>, fallback: usize) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|parsed| *parsed > 0)
        .unwrap_or(fallback)
}

/// RFC 3339 UTC timestamp with fixed microsecond precision, so stored
/// timestamps sort lexically in chronological order.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
