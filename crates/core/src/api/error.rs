use reqwest::StatusCode;
use serde_json::Value;

/// Failure of a single request against the rebalancing API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}: {}", http_summary(.detail, .body))]
    Http {
        url: String,
        status: StatusCode,
        detail: Option<String>,
        body: String,
    },

    #[error("malformed response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

fn http_summary<'a>(detail: &'a Option<String>, body: &'a String) -> &'a str {
    detail.as_deref().unwrap_or(body.as_str())
}

impl ApiError {
    /// The server-provided `detail` message, when the error response carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// What to show the user: the server's detail when present, else the error itself.
    pub fn user_message(&self) -> String {
        match self.detail() {
            Some(detail) => detail.to_string(),
            None => self.to_string(),
        }
    }
}

/// Renders a `detail` payload. Strings are shown bare, anything else as JSON.
pub fn detail_text(detail: &Value) -> String {
    match detail {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    value.get("detail").map(detail_text)
}
