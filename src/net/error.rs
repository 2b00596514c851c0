//! Uniform failure type for every remote call.
//!
//! ERROR HANDLING
//! ==============
//! Wrappers never panic and never swallow: they hand an [`ApiError`] back
//! and the call site decides once whether the user sees it or it is only
//! logged.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// The request never produced a response (DNS, refused, timeout, CORS).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("response parse failed: {0}")]
    Decode(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The stored bearer token was rejected.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { status, message } if message.is_empty() => {
                format!("Request failed with status {status}")
            }
            Self::Status { message, .. } => message.clone(),
            Self::Transport(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::InvalidUrl(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Pull a readable message out of an error response body.
///
/// Accepts `{"message": ..}`, `{"error": ..}`, a bare JSON string, or plain
/// text. Returns an empty string for an empty body.
#[must_use]
pub fn message_from_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(serde_json::Value::Object(map)) => ["message", "error", "detail"]
            .iter()
            .find_map(|key| map.get(*key).and_then(serde_json::Value::as_str))
            .map_or_else(|| trimmed.to_owned(), str::to_owned),
        _ => trimmed.to_owned(),
    }
}
