//! The single error type surfaced by the API client.

use serde_json::Value;
use thiserror::Error;

/// A failed call to the MCQ service, reduced to a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The service could not be reached or the connection broke.
    pub fn transport(err: &reqwest::Error) -> Self {
        Self::new(format!("Could not reach the MCQ service: {}", err))
    }

    /// A success response whose body could not be decoded.
    pub fn unexpected(cause: impl std::fmt::Display) -> Self {
        Self::new(format!("Unexpected response from server: {}", cause))
    }

    /// Build an error from a non-success response body.
    ///
    /// Uses the `detail` field when present, otherwise `fallback`.
    pub fn from_body(body: &str, fallback: &str) -> Self {
        Self::new(detail_message(body).unwrap_or_else(|| fallback.to_string()))
    }
}

/// Extract `detail` from an error body.
///
/// `detail` is either a plain string or a list of validation entries with `msg`.
fn detail_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(entries) => {
            let msgs: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}
