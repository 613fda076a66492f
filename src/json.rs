//! JSON helpers.
//!
//! A cheap validity probe and decode wrappers that trade exceptions for
//! `Option`/`Result`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// Checks if a string is JSON or not.
///
/// A value only qualifies when it opens with `{` or `[` and parses as a
/// whole, so bare numbers and strings with JSON embedded mid-text are
/// rejected:
///
/// ```
/// use sidekick::json::is_json;
///
/// assert!(is_json(r#"{"123":"456"}"#));
/// assert!(is_json(r#"[{"123":456}]"#));
/// assert!(!is_json("12312312"));
/// assert!(!is_json(r#"text{"123":123}"#));
/// ```
pub fn is_json(value: &str) -> bool {
    let opens_like_json = matches!(value.as_bytes().first(), Some(b'{') | Some(b'['));
    opens_like_json && serde_json::from_str::<Value>(value).is_ok()
}

/// Decode JSON into a typed value.
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

/// Decode JSON without an error.
///
/// Where [`decode`] would return an error for `"foo"`, this returns `None`.
pub fn decode_silent<T: DeserializeOwned>(json: &str) -> Option<T> {
    serde_json::from_str(json).ok()
}

/// Decode JSON into an untyped value, falling back to a caller default.
pub fn decode_silent_or(json: &str, default: Value) -> Value {
    serde_json::from_str(json).unwrap_or(default)
}
