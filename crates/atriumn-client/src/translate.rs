//! Mapping from HTTP status and body to a task result or a taxonomy error.

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{Error, Result};

/// Decoded JSON object body of a successful call, passed through unmodified.
pub type TaskResult = serde_json::Map<String, Value>;

/// Translate a response into a result or exactly one error.
///
/// | Status | Error |
/// |---|---|
/// | 401 | [`Error::Authentication`] |
/// | 404 | [`Error::NotFound`] |
/// | 400, 422 | [`Error::Validation`] |
/// | other >= 400 | [`Error::Api`] |
/// | 200-399 with a non-object body | [`Error::InvalidResponse`] |
pub fn translate(status: u16, body: &str) -> Result<TaskResult> {
    match status {
        401 => Err(Error::Authentication(
            detail(body).unwrap_or_else(|| "check your API key".to_string()),
        )),
        404 => Err(Error::NotFound("task not found".to_string())),
        400 | 422 => Err(Error::Validation(detail_or_body(status, body))),
        s if s >= 400 => Err(Error::Api {
            status,
            message: detail_or_body(s, body),
        }),
        _ => match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => Ok(map),
            _ => Err(Error::InvalidResponse {
                status,
                body: body.to_string(),
            }),
        },
    }
}

/// The `detail` field of a JSON error body.
///
/// Strings are returned verbatim; structured details (such as a list of
/// field errors) are rendered as compact JSON. A blank string counts as
/// no detail.
pub fn detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn detail_or_body(status: u16, body: &str) -> String {
    if let Some(detail) = detail(body) {
        return detail;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status))
}
