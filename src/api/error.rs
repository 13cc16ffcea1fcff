use std::fmt;

/// Failures the recommendation service can hand back.
///
/// Transport errors (connection refused, timeouts) stay as plain
/// `anyhow` errors; these are the cases where the server did answer.
#[derive(Debug)]
pub enum ApiError {
    /// Non-2xx response. `detail` comes from the `{"detail": ...}` body
    /// when the server sends one.
    Status { status: u16, detail: Option<String> },
    /// 2xx response whose body is not JSON
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status {
                status,
                detail: Some(detail),
            } => write!(f, "HTTP {}: {}", status, detail),
            ApiError::Status {
                status,
                detail: None,
            } => write!(f, "HTTP {}", status),
            ApiError::Decode(msg) => write!(f, "Invalid response body: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Build a status error from a raw error body, pulling out `detail`
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
            .filter(|d| !d.trim().is_empty());
        ApiError::Status { status, detail }
    }
}
