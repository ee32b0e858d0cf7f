use serde::{Deserialize, Deserializer};

pub fn first_page() -> i64 {
    1
}

// non-numeric page values fall back to the first page instead of rejecting the request;
// integers outside i64 saturate so they still land past the data
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| parse_page(v.trim()))
        .unwrap_or_else(first_page))
}

fn parse_page(value: &str) -> Option<i64> {
    if let Ok(page) = value.parse::<i64>() {
        return Some(page);
    }
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

// the web client sends select values as strings, so "" has to be rejected explicitly
pub fn deserialize_non_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        Err(serde::de::Error::invalid_length(0, &"a non-empty string"))
    } else {
        Ok(value)
    }
}
