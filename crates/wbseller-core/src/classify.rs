//! Mapping of failed HTTP exchanges onto [`ApiError`].

use serde_json::Value;

use crate::error::ApiError;

/// Classifies a non-2xx response.
///
/// Total over every status: 401 and 429 get their own kinds, everything else
/// (including `0`) is [`ApiErrorKind::Generic`](crate::ApiErrorKind::Generic)
/// carrying the body's `errors` list.
pub fn classify(status: u16, body: &Value) -> ApiError {
    match status {
        401 => ApiError::authentication(
            body_message(body).unwrap_or(ApiError::DEFAULT_AUTHENTICATION_MESSAGE),
        ),
        429 => ApiError::rate_limit(
            body_message(body).unwrap_or(ApiError::DEFAULT_RATE_LIMIT_MESSAGE),
        ),
        _ => ApiError::generic(
            status,
            body_message(body).unwrap_or(ApiError::DEFAULT_GENERIC_MESSAGE),
            body_errors(body),
        ),
    }
}

fn body_message(body: &Value) -> Option<&str> {
    body.get("message").and_then(Value::as_str)
}

fn body_errors(body: &Value) -> Vec<Value> {
    match body.get("errors") {
        Some(Value::Array(errors)) => errors.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other.clone()],
    }
}
