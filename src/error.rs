use std::path::PathBuf;
use thiserror::Error;

/// Every way a run can fail.
///
/// Fetch outcomes are a closed set: a successful body, an HTTP status error,
/// a timeout, a connectivity failure, some other transport failure, or a body
/// that is not valid JSON. Callers can match on all of them.
#[derive(Error, Debug)]
pub enum ChError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("HTTP error {status}: {}", preview(.body))]
    Http { status: u16, body: String },

    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("Connection error: {0}")]
    Connectivity(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Failed to decode JSON from response: {source}. Response preview: {preview}")]
    Parse {
        #[source]
        source: serde_json::Error,
        preview: String,
    },

    #[error("Error writing to file {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl From<reqwest::Error> for ChError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ChError::Timeout(error)
        } else if error.is_connect() {
            ChError::Connectivity(error)
        } else {
            ChError::Request(error)
        }
    }
}

/// First 200 characters of a response body, for diagnostics.
pub(crate) fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

pub type Result<T> = std::result::Result<T, ChError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_truncates_body() {
        let err = ChError::Http {
            status: 401,
            body: "x".repeat(500),
        };
        let message = err.to_string();
        assert!(message.starts_with("HTTP error 401: "));
        assert_eq!(message.len(), "HTTP error 401: ".len() + 200);
    }

    #[test]
    fn http_error_keeps_full_body() {
        let body = "y".repeat(300);
        let err = ChError::Http {
            status: 500,
            body: body.clone(),
        };
        match err {
            ChError::Http { body: kept, .. } => assert_eq!(kept, body),
            other => panic!("unexpected variant: {other}"),
        }
    }

    #[test]
    fn file_write_error_names_path() {
        let err = ChError::FileWrite {
            path: PathBuf::from("London_62020.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "Error writing to file London_62020.txt: denied"
        );
    }
}
