use chrono::Utc;
use serde_json::Value;

pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

pub fn unix_now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// Reads a required text field: non-empty strings as-is, non-zero numbers in
/// their decimal form. Anything else counts as missing.
pub fn required_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Optional text fields keep strings and numbers, dropping everything else.
pub fn optional_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Token lifetime in seconds: a positive whole number, else the default.
pub fn ttl_or_default(value: Option<&Value>) -> u64 {
    value
        .and_then(as_number)
        .map(f64::floor)
        .filter(|secs| *secs >= 1.0)
        .map(|secs| secs.min(u32::MAX as f64) as u64)
        .unwrap_or(DEFAULT_TOKEN_TTL_SECS)
}

/// RTC user id: a non-negative integer that fits in 32 bits, else 0.
pub fn uid_or_zero(value: Option<&Value>) -> u32 {
    value
        .and_then(as_number)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64)
        .map(|n| n as u32)
        .unwrap_or(0)
}
