use std::{fmt, time::Duration};

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything a call through [`crate::Client`] can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The request parameters cannot be turned into a URL.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("missing required parameter `{0}`")]
    MissingField(&'static str),

    #[error("coordinate `{field}` must be a finite number, got {value}")]
    NonFiniteCoordinate { field: &'static str, value: f64 },

    #[error("no API key supplied")]
    MissingApiKey,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// The service could not be reached, or its answer could not be read.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP GET failed")]
    Request(#[source] BoxError),

    #[error("failed to read HTTP body")]
    Body(#[source] BoxError),

    #[error("request timed out after {0:?}")]
    TimedOut(Duration),

    #[error("request was cancelled")]
    Cancelled,
}

/// A body did not match the schema its status code selected.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to decode {endpoint} response: {reason}")]
    Success {
        endpoint: &'static str,
        reason: serde_json::Error,
    },

    #[error("HTTP GET returned status '{status_text}', and the failure body could not be decoded: {reason}")]
    Failure {
        status: u16,
        status_text: String,
        reason: serde_json::Error,
    },
}

/// The `cod` member of a failure body.
///
/// Most endpoints send an integer, `find` sends a string. Both are kept as
/// received rather than coerced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    Numeric(i64),
    Text(String),
}

impl ApiErrorCode {
    /// Numeric value of the code, parsing textual codes such as `"404"`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ApiErrorCode::Numeric(n) => Some(*n),
            ApiErrorCode::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorCode::Numeric(n) => write!(f, "{n}"),
            ApiErrorCode::Text(s) => f.write_str(s),
        }
    }
}

/// A well-formed failure answer from the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("request failed with {code}: {message}")]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_includes_code() {
        let err = ApiError::new(ApiErrorCode::Numeric(401), "Invalid API key.");
        assert_eq!(err.to_string(), "request failed with 401: Invalid API key.");
    }

    #[test]
    fn textual_code_parses_as_number() {
        assert_eq!(ApiErrorCode::Text("404".into()).as_i64(), Some(404));
        assert_eq!(ApiErrorCode::Text("bad".into()).as_i64(), None);
    }

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err: Error = QueryError::MissingField("q").into();
        assert_eq!(err.to_string(), "missing required parameter `q`");
    }
}
