use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the recon service client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {message}")]
    Status {
        url: String,
        status: StatusCode,
        message: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// HTTP status of a non-2xx response, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Pull the service's `{"error": "..."}` message out of a response body.
pub(crate) fn error_message_from_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(v) => match v.get("error").and_then(|e| e.as_str()) {
            Some(msg) => msg.to_string(),
            None => body.trim().to_string(),
        },
        Err(_) => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no response body".to_string()
            } else {
                trimmed.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_service_error_message() {
        assert_eq!(
            error_message_from_body(r#"{"error": "Scan ID not found"}"#),
            "Scan ID not found"
        );
        assert_eq!(error_message_from_body("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_message_from_body(""), "no response body");
    }

    #[test]
    fn not_found_is_detected() {
        let err = ApiError::Status {
            url: "http://localhost:5000/api/scan/status/x".into(),
            status: StatusCode::NOT_FOUND,
            message: "Scan ID not found".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "http://localhost:5000/api/scan/status/x returned 404 Not Found: Scan ID not found"
        );
    }
}
